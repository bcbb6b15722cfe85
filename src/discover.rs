/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::error::SplitError;
use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};

/// Resolve the input pattern into the list of files to split.
///
/// A pattern whose file name has no `*` is returned as is, without checking
/// that it exists. Otherwise the containing directory is searched (and its
/// sub folders when `recurse` is set). Matches are sorted.
pub fn discover_files(pattern: &str, recurse: bool) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let file_pattern = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(vec![path.to_path_buf()]),
    };
    if !file_pattern.contains('*') {
        return Ok(vec![path.to_path_buf()]);
    }

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let folder_str = folder.to_string_lossy();
    if folder_str.contains('*') {
        return Err(SplitError::InvalidPattern(format!(
            "wildcards are only supported in the file name: {}",
            pattern
        ))
        .into());
    }
    if !folder.is_dir() {
        return Err(SplitError::InputNotFound(folder.clone()).into());
    }

    // 只有 '*' 是通配符, 其它 glob 元字符按普通字符处理
    let escaped_name = file_pattern
        .split('*')
        .map(Pattern::escape)
        .collect::<Vec<_>>()
        .join("*");
    let escaped_folder = Pattern::escape(&folder_str);
    let full_pattern = if recurse {
        format!("{}/**/{}", escaped_folder, escaped_name)
    } else {
        format!("{}/{}", escaped_folder, escaped_name)
    };
    log::debug!("Searching input files with glob: {}", full_pattern);

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let paths = glob_with(&full_pattern, options)
        .map_err(|e| SplitError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in paths {
        let entry = entry.with_context(|| format!("Error resolving pattern: {}", pattern))?;
        if entry.is_file() {
            files.push(entry);
        }
    }

    if files.is_empty() {
        return Err(SplitError::NothingToDo(format!("no files match {}", pattern)).into());
    }

    files.sort();
    files.dedup();
    log::info!("Discovered {} input files for {}", files.len(), pattern);
    Ok(files)
}
