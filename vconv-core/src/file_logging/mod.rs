//! Per-run diagnostic log.
//!
//! Every run writes its own `conversion_errors_<timestamp>.log`. The file is
//! fed from the run's events: job starts and successes at INFO, failures at
//! ERROR together with the encoder's diagnostic, and a completion line.
//! Each line is mirrored to the `log` facade so the console shows it too.

pub mod setup;

use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventHandler};
use crate::request::BatchResult;
use crate::utils::{file_name_of, format_duration};
use chrono::Local;
use log::{Level, Record};
use log4rs::append::Append;
use log4rs::append::file::FileAppender;
use std::path::{Path, PathBuf};

const TARGET: &str = "vconv::run";

#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    appender: FileAppender,
}

impl RunLog {
    /// Creates `log_dir` if needed and opens a new log named after the current time.
    pub fn open(log_dir: &Path) -> CoreResult<Self> {
        let path = log_dir.join(setup::log_file_name(Local::now()));
        let appender = setup::build_file_appender(&path).map_err(|e| {
            CoreError::Log(format!("cannot open '{}': {:#}", path.display(), e))
        })?;
        log::debug!("Diagnostic log: {}", path.display());
        Ok(Self { path, appender })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }

    fn write(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
        let written = self.appender.append(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(TARGET)
                .build(),
        );
        if let Err(e) = written {
            log::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }

    pub fn log_completion(&self, result: &BatchResult) {
        self.info(&format!(
            "Conversion complete: {} of {} file(s) converted, {} failed. Output: {}",
            result.succeeded(),
            result.total,
            result.failed(),
            result.output_directory.display()
        ));
        self.flush();
    }

    pub fn log_abort(&self, message: &str) {
        self.error(&format!("Conversion aborted: {}", message));
        self.flush();
    }

    pub fn flush(&self) {
        self.appender.flush();
    }
}

impl EventHandler for RunLog {
    fn handle(&self, event: &Event) {
        match event {
            Event::BatchStarted {
                total, output_dir, ..
            } => {
                self.info(&format!(
                    "Starting conversion of {} file(s) into {}",
                    total,
                    output_dir.display()
                ));
            }

            Event::JobStarted {
                index,
                total,
                source,
            } => {
                self.info(&format!(
                    "Converting {} ({}/{})",
                    file_name_of(source),
                    index,
                    total
                ));
            }

            Event::JobSucceeded {
                source,
                output,
                elapsed,
            } => {
                self.info(&format!(
                    "Converted {} -> {} in {}",
                    file_name_of(source),
                    output.display(),
                    format_duration(*elapsed)
                ));
            }

            Event::JobFailed {
                filename, message, ..
            } => {
                self.error(&format!("Error converting {}: {}", filename, message));
            }

            // Completion lines come from log_completion/log_abort, which the
            // orchestrator calls before the terminal event is emitted
            Event::Progress { .. } | Event::BatchComplete { .. } | Event::BatchFailed { .. } => {}
        }
    }
}
