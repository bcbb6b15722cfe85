/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::error::SplitError;
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path of the gzip companion: the full file name with `.gz` appended.
pub fn gz_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

/// Gzip `path` into `{path}.gz`, keeping the original.
///
/// On failure the partially written companion is removed, so a file either
/// has a complete `.gz` or none.
pub fn compress_file(path: &Path, overwrite: bool) -> Result<PathBuf> {
    let target = gz_path(path);
    let input = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let output = options.open(&target).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            anyhow::Error::new(SplitError::OutputExists(target.clone()))
        } else {
            anyhow::Error::new(e).context(format!("Failed to create {}", target.display()))
        }
    })?;

    let result = (|| -> io::Result<u64> {
        let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::best());
        let copied = io::copy(&mut BufReader::new(input), &mut encoder)?;
        encoder.finish()?.flush()?;
        Ok(copied)
    })();

    match result {
        Ok(copied) => {
            log::debug!("Compressed {} ({} bytes) to {}", path.display(), copied, target.display());
            Ok(target)
        }
        Err(e) => {
            // 压缩失败，清理不完整的 .gz 文件
            let _ = fs::remove_file(&target);
            Err(anyhow::Error::new(e).context(format!("Failed to compress {}", path.display())))
        }
    }
}

/// Compress every split file found directly in `folder`.
///
/// A file is picked when its extension is one of `extensions` (given without
/// the leading dot, an empty string standing for "no extension"). Existing
/// `.gz` files are never compressed again. Without `overwrite`, files left
/// over from earlier runs that already have a companion are skipped, while
/// a companion in the way of one of `produced` is an error. The first
/// failure stops the pass.
pub fn compress_output_folder(
    folder: &Path,
    extensions: &BTreeSet<String>,
    produced: &[PathBuf],
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(folder)
        .with_context(|| format!("Failed to read output folder {}", folder.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("gz") {
            continue;
        }
        if !extensions.contains(&extension) {
            continue;
        }
        if !overwrite && gz_path(&path).exists() && !produced.iter().any(|p| p == &path) {
            log::debug!("Skipping {}, already compressed", path.display());
            continue;
        }
        candidates.push(path);
    }
    candidates.sort();

    let mut compressed = Vec::with_capacity(candidates.len());
    for path in candidates {
        compressed.push(compress_file(&path, overwrite)?);
    }
    log::info!("Compressed {} files in {}", compressed.len(), folder.display());
    Ok(compressed)
}
