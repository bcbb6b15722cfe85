/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "filesplit",
    version,
    about = "Split large delimited text files into smaller numbered files",
    override_usage = "filesplit -i <PATTERN> -o <FOLDER> -m <LINES> [OPTIONS]"
)]
pub struct SplitArgs {
    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub limits: LimitOptions,

    #[command(flatten)]
    pub basic: BasicOptions,

    #[command(flatten)]
    pub logging: LoggingOptions,
}

#[derive(Debug, Clone, Args, Default)]
#[group(id = "input_options")]
#[command(next_help_heading = "Input")]
pub struct InputOptions {
    /// The file(s) to split, the file name may contain one '*' wildcard
    #[arg(short = 'i', long = "inputfilepattern", value_name = "PATTERN", required = true)]
    pub input_pattern: String,

    /// Find matching files in all sub folders
    #[arg(short = 's', long = "recursesubfolders", action = ArgAction::SetTrue)]
    pub recurse: bool,

    /// The number of header rows
    #[arg(short = 'd', long = "headerrows", value_name = "ROWS", default_value_t = 1)]
    pub header_rows: usize,

    /// Repeat header rows in each split file (true/false)
    #[arg(
        short = 'r',
        long = "repeatheaderrows",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub repeat_header_rows: bool,
}

#[derive(Debug, Clone, Args, Default)]
#[group(id = "output_options")]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// The output folder, must already exist
    #[arg(short = 'o', long = "outputfolder", value_name = "FOLDER", required = true)]
    pub output_folder: PathBuf,

    /// Filename base for split files (ignored for wildcard patterns)
    #[arg(short = 'b', long = "outputfilenamebase", value_name = "BASE")]
    pub output_filename_base: Option<String>,

    /// Overwrite existing output files
    #[arg(short = 'w', long = "overwrite", action = ArgAction::SetTrue)]
    pub overwrite: bool,

    /// Gzip compress split files after splitting (keeps the originals)
    #[arg(short = 'c', long = "compress", action = ArgAction::SetTrue)]
    pub compress: bool,
}

#[derive(Debug, Clone, Args, Default)]
#[group(id = "limit_options")]
#[command(next_help_heading = "Split limits")]
pub struct LimitOptions {
    /// The maximum number of data lines in each split file
    #[arg(
        short = 'm',
        long = "maxlinesperfile",
        value_name = "LINES",
        value_parser = clap::value_parser!(u64).range(1..),
        required_unless_present = "max_file_size"
    )]
    pub max_lines_per_file: Option<u64>,

    /// The maximum size of each split file, nm n number and m multiplier (kmgt, default m), 100k -> 100 kB
    #[arg(short = 'x', long = "maxfilesize", value_name = "size", value_parser = |s: &str| parse_size_arg(s, 1))]
    pub max_file_size: Option<u64>,
}

#[derive(Debug, Clone, Args, Default)]
#[group(id = "basic_options")]
#[command(next_help_heading = "Basic options")]
pub struct BasicOptions {
    /// Quiet operation
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose operation
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args, Default)]
#[group(id = "logging")]
#[command(next_help_heading = "Logging")]
pub struct LoggingOptions {
    /// Open file at path as logfile (overwrite existing file)
    #[arg(long = "lf", value_name = "LOGFILE")]
    pub logfile: Option<PathBuf>,

    /// Append to existing logfile
    #[arg(long = "la", action = ArgAction::SetTrue, requires = "logfile")]
    pub logfile_append: bool,

    /// Include info messages (default just the run header and summary)
    #[arg(long = "li", action = ArgAction::SetTrue, requires = "logfile")]
    pub logfile_info: bool,
}

// 解析大小参数, 支持 100m, 1g 等格式, 不带单位时按 m 计算
pub fn parse_size_arg(s: &str, min_size: u64) -> Result<u64, String> {
    let re = regex::Regex::new(r"^(?i)(\d+)([kmgt]?)$").map_err(|e| e.to_string())?;
    let caps = re
        .captures(s)
        .ok_or_else(|| format!("Invalid size format '{}', must be like 100m, 100k etc.", s))?;

    let num = caps[1].parse::<u64>().map_err(|e| e.to_string())?;
    let unit = caps.get(2).map(|m| m.as_str().to_lowercase());

    let multiplier: u64 = match unit.as_deref() {
        Some("k") => 1024,
        Some("m") | Some("") | None => 1024 * 1024,
        Some("g") => 1024 * 1024 * 1024,
        Some("t") => 1024 * 1024 * 1024 * 1024,
        Some(other) => return Err(format!("Unknown size unit '{}'", other)),
    };
    let size = num
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Size '{}' is too large", s))?;

    if size < min_size {
        return Err(format!(
            "Split size must be at least {}, got {} bytes",
            min_size, size
        ));
    }

    Ok(size)
}
