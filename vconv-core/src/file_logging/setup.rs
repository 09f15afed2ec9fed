use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log4rs::{append::file::FileAppender, encode::pattern::PatternEncoder};
use std::path::Path;

use crate::config::LOG_FILE_PREFIX;

/// Line layout of every diagnostic log.
pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

/// `conversion_errors_<YYYYMMDD_HHMMSS>.log` for the given start time.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!(
        "{}_{}.log",
        LOG_FILE_PREFIX,
        started.format("%Y%m%d_%H%M%S")
    )
}

pub fn build_file_appender(log_file: &Path) -> Result<FileAppender> {
    // Create log directory if it doesn't exist
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)?;
    Ok(appender)
}
