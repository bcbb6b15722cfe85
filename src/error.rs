/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("filesplit error: Invalid command arguments ({0})")]
    InvalidArguments(String),

    #[error("filesplit error: Not found ({})", .0.display())]
    InputNotFound(PathBuf),

    #[error("filesplit error: Output file exists, use -w to overwrite ({})", .0.display())]
    OutputExists(PathBuf),

    #[error("filesplit error: Pattern error ({0})")]
    InvalidPattern(String),

    #[error("filesplit error: Nothing to do! ({0})")]
    NothingToDo(String),
}
