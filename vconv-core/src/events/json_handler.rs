//! JSON event handler for structured output
//!
//! Writes one JSON object per line for every run event, so other tools can
//! follow a conversion without scraping the terminal output.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs events as JSON lines
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventHandler {
    /// Create a handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }

    /// JSON form of an event, without the timestamp.
    pub fn to_json(event: &Event) -> serde_json::Value {
        match event {
            Event::BatchStarted {
                total,
                output_dir,
                log_path,
            } => json!({
                "type": "batch_started",
                "total": total,
                "output_dir": output_dir.display().to_string(),
                "log_path": log_path.display().to_string(),
            }),

            Event::JobStarted {
                index,
                total,
                source,
            } => json!({
                "type": "job_started",
                "index": index,
                "total": total,
                "source": source.display().to_string(),
            }),

            Event::JobSucceeded {
                source,
                output,
                elapsed,
            } => json!({
                "type": "job_succeeded",
                "source": source.display().to_string(),
                "output": output.display().to_string(),
                "elapsed_seconds": elapsed.as_secs_f64(),
            }),

            Event::JobFailed {
                source,
                filename,
                message,
            } => json!({
                "type": "job_failed",
                "source": source.display().to_string(),
                "filename": filename,
                "message": message,
            }),

            Event::Progress { completed, total } => json!({
                "type": "progress",
                "completed": completed,
                "total": total,
                "percent": if *total > 0 {
                    (*completed as f64 / *total as f64 * 100.0).round()
                } else {
                    0.0
                },
            }),

            Event::BatchComplete { result } => json!({
                "type": "batch_complete",
                "output_dir": result.output_directory.display().to_string(),
                "log_path": result.log_path.display().to_string(),
                "total": result.total,
                "succeeded": result.succeeded(),
                "failed": result.failed(),
                "failures": result
                    .failures()
                    .map(|outcome| json!({
                        "filename": outcome.job.file_name(),
                        "message": outcome.diagnostic,
                    }))
                    .collect::<Vec<_>>(),
            }),

            Event::BatchFailed { message } => json!({
                "type": "batch_failed",
                "message": message,
            }),
        }
    }
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        let mut value = Self::to_json(event);
        if let Some(object) = value.as_object_mut() {
            object.insert("timestamp".to_string(), json!(Self::get_timestamp()));
        }
        self.write_json(value);
    }
}
