//! Utility functions for formatting and path handling.
//!
//! This module provides small helpers used throughout the vconv-core library:
//! video file detection, duration formatting and printable file names.

use std::path::Path;
use std::time::Duration;

use crate::config::VIDEO_EXTENSIONS;

/// Checks whether the path has one of the supported video extensions.
/// The comparison ignores case; the file itself is not inspected.
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext_str.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Formats a duration as HH:MM:SS (e.g., 3725s -> "01:02:05").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// File name component of a path, falling back to the whole path.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Keeps at most the last `max_lines` lines of `text`.
#[must_use]
pub fn last_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
