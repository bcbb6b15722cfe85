/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::config::SplitConfig;
use crate::error::SplitError;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of splitting a single input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub input: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub header_lines: usize,
    pub data_lines: u64,
    pub bytes_written: u64,
}

// 当前正在写入的输出文件
struct OpenOutput {
    writer: BufWriter<File>,
    path: PathBuf,
    lines: u64,
    bytes: u64,
}

impl OpenOutput {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer
            .write_all(line)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.bytes += line.len() as u64;
        Ok(())
    }

    fn close(mut self) -> Result<u64> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        log::debug!(
            "Closed {} ({} lines, {} bytes)",
            self.path.display(),
            self.lines,
            self.bytes
        );
        Ok(self.bytes)
    }
}

enum OutputState {
    NoOutputOpen,
    Open(OpenOutput),
}

/// Per input file state: the open output, and how many outputs were created.
struct SplitSession<'a> {
    config: &'a SplitConfig,
    base: String,
    extension: String,
    header: &'a [Vec<u8>],
    state: OutputState,
    file_counter: u32,
    report: SplitReport,
}

impl<'a> SplitSession<'a> {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let limits = self.config.limits;
        // 取出当前输出, 换新文件时旧文件在这里关闭
        let state = std::mem::replace(&mut self.state, OutputState::NoOutputOpen);
        let mut output = match state {
            OutputState::Open(output)
                if !limits.exceeded_by(output.lines, output.bytes, line.len() as u64) =>
            {
                output
            }
            OutputState::Open(output) => {
                self.report.bytes_written += output.close()?;
                self.open_next()?
            }
            OutputState::NoOutputOpen => self.open_next()?,
        };

        output.write_line(line)?;
        output.lines += 1;
        self.report.data_lines += 1;
        self.state = OutputState::Open(output);
        Ok(())
    }

    fn open_next(&mut self) -> Result<OpenOutput> {
        self.file_counter += 1;
        let path = output_filename(
            &self.config.output_folder,
            &self.base,
            self.file_counter,
            &self.extension,
        );
        let file = create_output(&path, self.config.overwrite)?;
        log::debug!("Opened split file {}", path.display());

        let mut output = OpenOutput {
            writer: BufWriter::new(file),
            path: path.clone(),
            lines: 0,
            bytes: 0,
        };
        if self.config.repeat_header_rows || self.file_counter == 1 {
            for row in self.header {
                output.write_line(row)?;
            }
        }
        self.report.outputs.push(path);
        Ok(output)
    }

    fn close_current(&mut self) -> Result<()> {
        if let OutputState::Open(output) =
            std::mem::replace(&mut self.state, OutputState::NoOutputOpen)
        {
            self.report.bytes_written += output.close()?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<SplitReport> {
        self.close_current()?;
        Ok(self.report)
    }
}

/// Splits input files according to a [`SplitConfig`].
pub struct Splitter<'a> {
    config: &'a SplitConfig,
}

impl<'a> Splitter<'a> {
    pub fn new(config: &'a SplitConfig) -> Self {
        Self { config }
    }

    pub fn split_file(&self, input: &Path) -> Result<SplitReport> {
        let file = File::open(input).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::new(SplitError::InputNotFound(input.to_path_buf()))
            } else {
                anyhow::Error::new(e).context(format!("Failed to open {}", input.display()))
            }
        })?;
        let mut reader = BufReader::new(file);

        let header = read_header_rows(&mut reader, self.config.header_rows)
            .with_context(|| format!("Failed to read header rows of {}", input.display()))?;
        log::debug!(
            "Read {} header rows from {}",
            header.len(),
            input.display()
        );

        let mut session = SplitSession {
            config: self.config,
            base: output_base(self.config, input),
            extension: output_extension(input),
            header: &header,
            state: OutputState::NoOutputOpen,
            file_counter: 0,
            report: SplitReport {
                input: input.to_path_buf(),
                header_lines: header.len(),
                ..Default::default()
            },
        };

        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            if read == 0 {
                break;
            }
            session.write_line(&line)?;
        }

        let report = session.finish()?;
        if report.outputs.is_empty() {
            log::info!("{} has no data lines, nothing written", input.display());
        }
        Ok(report)
    }
}

// 读取表头行, 空白行读掉但不保留, 文件提前结束不算错误
fn read_header_rows<R: BufRead>(reader: &mut R, count: usize) -> std::io::Result<Vec<Vec<u8>>> {
    let mut rows = Vec::with_capacity(count.min(16));
    for _ in 0..count {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if !line.iter().all(u8::is_ascii_whitespace) {
            rows.push(line);
        }
    }
    Ok(rows)
}

fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            anyhow::Error::new(SplitError::OutputExists(path.to_path_buf()))
        } else {
            anyhow::Error::new(e).context(format!("Failed to create {}", path.display()))
        }
    })
}

/// Base name of the split files: the configured override, or the input's file stem.
pub fn output_base(config: &SplitConfig, input: &Path) -> String {
    match config.base_override() {
        Some(base) => base.to_string(),
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Extension of the input including the leading dot, or empty.
pub fn output_extension(input: &Path) -> String {
    input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub fn output_filename(folder: &Path, base: &str, counter: u32, extension: &str) -> PathBuf {
    folder.join(format!("{}_{:06}{}", base, counter, extension))
}
