/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::cli::SplitArgs;
use crate::error::SplitError;
use anyhow::Result;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Rotation thresholds for a single output file. At least one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitLimits {
    pub max_lines: Option<NonZeroU64>,
    pub max_bytes: Option<NonZeroU64>,
}

impl SplitLimits {
    pub fn lines(max_lines: u64) -> Self {
        Self {
            max_lines: NonZeroU64::new(max_lines),
            max_bytes: None,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = NonZeroU64::new(max_bytes);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_lines.is_none() && self.max_bytes.is_none()
    }

    // 当前文件已有 lines 行、bytes 字节时, 再写入 next_len 字节的一行是否需要换新文件
    pub fn exceeded_by(&self, lines: u64, bytes: u64, next_len: u64) -> bool {
        if lines == 0 {
            // 空文件至少接收一行, 否则超长的行永远写不出去
            return false;
        }
        let over_lines = self.max_lines.is_some_and(|max| lines >= max.get());
        let over_bytes = self
            .max_bytes
            .is_some_and(|max| bytes.saturating_add(next_len) > max.get());
        over_lines || over_bytes
    }
}

/// Immutable split settings, built once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub input_pattern: String,
    pub recurse: bool,
    pub header_rows: usize,
    pub repeat_header_rows: bool,
    pub output_folder: PathBuf,
    pub output_filename_base: Option<String>,
    pub overwrite: bool,
    pub compress: bool,
    pub limits: SplitLimits,
}

impl SplitConfig {
    /// Config with the command line defaults: one header row, repeated in every file.
    pub fn new(
        input_pattern: impl Into<String>,
        output_folder: impl Into<PathBuf>,
        limits: SplitLimits,
    ) -> Self {
        Self {
            input_pattern: input_pattern.into(),
            recurse: false,
            header_rows: 1,
            repeat_header_rows: true,
            output_folder: output_folder.into(),
            output_filename_base: None,
            overwrite: false,
            compress: false,
            limits,
        }
    }

    pub fn from_args(args: &SplitArgs) -> Result<Self> {
        let limits = SplitLimits {
            max_lines: args.limits.max_lines_per_file.and_then(NonZeroU64::new),
            max_bytes: args.limits.max_file_size.and_then(NonZeroU64::new),
        };
        let config = Self {
            input_pattern: args.input.input_pattern.clone(),
            recurse: args.input.recurse,
            header_rows: args.input.header_rows,
            repeat_header_rows: args.input.repeat_header_rows,
            output_folder: args.output.output_folder.clone(),
            output_filename_base: args.output.output_filename_base.clone(),
            overwrite: args.output.overwrite,
            compress: args.output.compress,
            limits,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_pattern.trim().is_empty() {
            return Err(SplitError::InvalidArguments(
                "missing required option -i=inputfilepattern".to_string(),
            )
            .into());
        }
        if self.output_folder.as_os_str().is_empty() {
            return Err(SplitError::InvalidArguments(
                "missing required option -o=outputfolder".to_string(),
            )
            .into());
        }
        if self.limits.is_unbounded() {
            return Err(SplitError::InvalidArguments(
                "missing required option, one of -m=maxlinesperfile or -x=maxfilesize".to_string(),
            )
            .into());
        }
        if !self.output_folder.is_dir() {
            return Err(SplitError::InvalidArguments(format!(
                "output folder {} does not exist",
                self.output_folder.display()
            ))
            .into());
        }
        Ok(())
    }

    /// True when the file name part of the input pattern holds a wildcard.
    pub fn is_multi_file(&self) -> bool {
        Path::new(&self.input_pattern)
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains('*'))
    }

    pub fn base_override(&self) -> Option<&str> {
        if self.is_multi_file() {
            return None;
        }
        self.output_filename_base
            .as_deref()
            .filter(|base| !base.trim().is_empty())
    }
}
