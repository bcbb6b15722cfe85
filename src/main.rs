/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use clap::error::ErrorKind;
use clap::Parser;
use filesplit::cli::SplitArgs;
use filesplit::utils::common::format_size;
use filesplit::utils::log::LogConfig;
use filesplit::utils::logfile::RunLog;
use filesplit::{run, SplitConfig};
use log::LevelFilter;
use std::process::ExitCode;

fn usage_error(message: &str) -> ExitCode {
    println!("{}", message);
    println!("Try `filesplit --help' for more information.");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = match SplitArgs::try_parse_from(&raw_args) {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", e.render());
                return ExitCode::SUCCESS;
            }
            _ => {
                print!("{}", e.render());
                return ExitCode::FAILURE;
            }
        },
    };

    let level = if args.basic.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    LogConfig::init_logger(args.basic.quiet, args.basic.verbose, level);

    // 参数校验在任何文件读写之前完成
    let config = match SplitConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => return usage_error(&e.to_string()),
    };
    log::debug!("Split configuration: {:?}", config);

    let mut run_log = match &args.logging.logfile {
        Some(path) => match RunLog::new(path, args.logging.logfile_append, args.logging.logfile_info) {
            Ok(log) => Some(log),
            Err(e) => {
                println!("filesplit error: {:#}", e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };
    if let Some(log) = run_log.as_mut() {
        if let Err(e) = log.log_command(&raw_args) {
            log::warn!("Failed to write log file: {:#}", e);
        }
    }

    let result = run(&config, run_log.as_mut());
    let code = match &result {
        Ok(summary) => {
            LogConfig::println_verbose(&format!(
                "total: {} files split into {} files, {} data lines ({} bytes)",
                summary.files_processed,
                summary.outputs.len(),
                summary.data_lines,
                format_size(summary.bytes_written, 1)
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            println!("{:#}", e);
            if let Some(log) = run_log.as_mut() {
                let _ = log.write_error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    };

    if let Some(log) = run_log.as_mut() {
        if let Err(e) = log.close() {
            log::warn!("Failed to close log file: {:#}", e);
        }
    }
    code
}
