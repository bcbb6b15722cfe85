/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

//! Split large delimited text files into numbered chunks bounded by a line
//! count (and optionally a byte size), repeating header rows on demand and
//! gzip compressing the results afterwards.

pub mod app;
pub mod cli;
pub mod compress;
pub mod config;
pub mod discover;
pub mod error;
pub mod splitter;
pub mod utils;

pub use app::{run, RunSummary};
pub use config::{SplitConfig, SplitLimits};
pub use error::SplitError;
pub use splitter::{SplitReport, Splitter};
