/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// 来格式化大小, ext 保留几位小数
pub fn format_size(size: u64, ext: u8) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.*}G", ext as usize, size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.*}M", ext as usize, size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.*}K", ext as usize, size as f64 / KB as f64)
    } else {
        format!("{}", size)
    }
}

// 收集输出文件的扩展名(不带点), 无扩展名记为空串
pub fn collect_extensions(paths: &[PathBuf]) -> BTreeSet<String> {
    paths
        .iter()
        .map(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
