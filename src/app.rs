/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::compress::compress_output_folder;
use crate::config::SplitConfig;
use crate::discover::discover_files;
use crate::splitter::Splitter;
use crate::utils::common::{collect_extensions, display_name};
use crate::utils::log::LogConfig;
use crate::utils::logfile::RunLog;
use anyhow::Result;
use std::path::PathBuf;

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub outputs: Vec<PathBuf>,
    pub compressed: Vec<PathBuf>,
    pub data_lines: u64,
    pub bytes_written: u64,
}

/// Discover the inputs, split each one in turn, then compress the output
/// folder when asked to. Any error stops the run.
pub fn run(config: &SplitConfig, mut run_log: Option<&mut RunLog>) -> Result<RunSummary> {
    let inputs = discover_files(&config.input_pattern, config.recurse)?;
    let splitter = Splitter::new(config);
    let mut summary = RunSummary::default();

    for input in &inputs {
        LogConfig::println(&format!("splitting: {}", input.display()));
        log::info!("Splitting {}", input.display());

        let report = splitter.split_file(input)?;
        for output in &report.outputs {
            let line = format!("  adding: {}", display_name(output));
            LogConfig::println(&line);
            if let Some(log) = run_log.as_deref_mut() {
                log.write_info(&line)?;
            }
        }
        if report.outputs.is_empty() {
            LogConfig::println_warning(&format!("no data lines in {}", input.display()));
        }
        LogConfig::println_verbose(&format!(
            "{:>8}(header rows {}, data lines {}, files {})",
            "",
            report.header_lines,
            report.data_lines,
            report.outputs.len()
        ));

        summary.files_processed += 1;
        summary.data_lines += report.data_lines;
        summary.bytes_written += report.bytes_written;
        summary.outputs.extend(report.outputs);
    }

    if config.compress {
        // 输出文件沿用输入文件的扩展名
        let extensions = collect_extensions(&inputs);
        log::info!(
            "Compressing split files in {} (extensions {:?})",
            config.output_folder.display(),
            extensions
        );
        summary.compressed = compress_output_folder(
            &config.output_folder,
            &extensions,
            &summary.outputs,
            config.overwrite,
        )?;
        for gz in &summary.compressed {
            let line = format!("  compressed: {}", display_name(gz));
            LogConfig::println_verbose(&line);
            if let Some(log) = run_log.as_deref_mut() {
                log.write_info(&line)?;
            }
        }
    }

    if let Some(log) = run_log {
        log.log_summary(
            summary.files_processed,
            summary.outputs.len(),
            summary.bytes_written,
        )?;
    }
    Ok(summary)
}
