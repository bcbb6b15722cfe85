/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

// --lf 参数生成的运行日志文件
use crate::utils::common::format_size;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct RunLog {
    log_file: File,
    log_file_info: bool,
}

impl RunLog {
    pub fn new(log_file_path: &Path, append: bool, log_file_info: bool) -> Result<Self> {
        let log_file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(log_file_path)
            .with_context(|| format!("Failed to open log file {}", log_file_path.display()))?;

        Ok(RunLog {
            log_file,
            log_file_info,
        })
    }

    pub fn log_command(&mut self, args: &[String]) -> Result<()> {
        // 跳过第一个参数（命令本身）
        let filtered_args = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

        writeln!(
            self.log_file,
            "---------\nFilesplit log opened {}",
            Local::now().format("%a %b %d %H:%M:%S %Y")
        )?;
        writeln!(
            self.log_file,
            "command line arguments:\n {}\n",
            filtered_args
        )?;
        Ok(())
    }

    // 只有 --li 时才写入逐文件信息
    pub fn write_info(&mut self, message: &str) -> Result<()> {
        if self.log_file_info {
            writeln!(self.log_file, "{}", message)?;
        }
        Ok(())
    }

    pub fn write_error(&mut self, message: &str) -> Result<()> {
        writeln!(self.log_file, "error: {}", message)?;
        Ok(())
    }

    pub fn log_summary(
        &mut self,
        total_inputs: usize,
        total_outputs: usize,
        total_bytes: u64,
    ) -> Result<()> {
        writeln!(
            self.log_file,
            "\nTotal {} input files split into {} files ({} bytes)",
            total_inputs,
            total_outputs,
            format_size(total_bytes, 0)
        )?;
        writeln!(
            self.log_file,
            "Done {}",
            Local::now().format("%a %b %d %H:%M:%S %Y")
        )?;
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        self.log_file.flush()?;
        Ok(())
    }
}
