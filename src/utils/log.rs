/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

// 统一的控制台输出和日志格式封装
use ::log::LevelFilter;
use env_logger::Env;
use std::sync::OnceLock;

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();

#[derive(Debug)]
pub struct LogConfig {
    pub quiet: bool,
    pub verbose: bool,
}

impl LogConfig {
    pub fn init_logger(quiet: bool, verbose: bool, level: LevelFilter) {
        // 只初始化一次, 重复调用保持第一次的设置
        if LOG_CONFIG.set(LogConfig { quiet, verbose }).is_err() {
            return;
        }

        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level.to_string()))
            .format(|buf, record| {
                use std::io::Write;
                let level_style = buf.default_level_style(record.level());
                writeln!(
                    buf,
                    "[{} {level_style}{}{level_style:#} {}:{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .try_init();
    }

    fn get() -> Option<&'static LogConfig> {
        LOG_CONFIG.get()
    }

    pub fn println(msg: &str) {
        if let Some(config) = Self::get() {
            if !config.quiet {
                println!("{}", msg);
            }
        }
    }

    pub fn println_warning(msg: &str) {
        if let Some(config) = Self::get() {
            if config.quiet {
                return;
            }
            println!("{:>8}filesplit warning: {}", "", msg);
        }
    }

    pub fn println_verbose(msg: &str) {
        if let Some(config) = Self::get() {
            if !config.quiet && config.verbose {
                println!("{}", msg);
            }
        }
    }
}
