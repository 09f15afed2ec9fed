//! File discovery module for finding video files to convert.
//!
//! This module handles the discovery of video files eligible for conversion.
//! It searches only the top level of the provided directory and keeps files
//! whose extension is one of mp4, avi, mkv or mov (case-insensitive).

use crate::codec::{Codec, ProresProfile};
use crate::error::{CoreError, CoreResult};
use crate::request::Job;
use crate::utils::has_video_extension;

use std::path::{Path, PathBuf};

/// Finds video files eligible for conversion in the specified directory.
///
/// Files are returned in the order the filesystem lists them. That order
/// numbers the jobs of a run but is not sorted.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the matching files
/// * `Err(CoreError::PathError)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no file matches
///
/// # Examples
///
/// ```rust,no_run
/// use vconv_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("/path/to/videos")) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to read input directory '{}': {}",
            input_dir.display(),
            e
        ))
    })?;

    let files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() || !has_video_extension(&path) {
                return None;
            }
            Some(path)
        })
        .collect();

    log::debug!(
        "Found {} video file(s) in {}",
        files.len(),
        input_dir.display()
    );

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

/// Scans `input_dir` and pairs every matching file with the batch settings.
///
/// Each call re-reads the directory.
pub fn enumerate_jobs(
    input_dir: &Path,
    codec: Codec,
    profile: Option<ProresProfile>,
) -> CoreResult<Vec<Job>> {
    let jobs = find_processable_files(input_dir)?
        .into_iter()
        .map(|path| Job::new(path, codec, profile))
        .collect();
    Ok(jobs)
}
