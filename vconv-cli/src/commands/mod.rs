//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command and
//! returns the process exit code.

/// The `convert` command: runs a batch and follows it until it ends.
pub mod convert;

/// The `codecs` command: lists codecs and ProRes profiles.
pub mod codecs;

/// Every file converted.
pub const EXIT_OK: i32 = 0;

/// The run did not start, or stopped before finishing its jobs.
pub const EXIT_NOT_RUN: i32 = 1;

/// The batch finished but at least one file failed.
pub const EXIT_FILES_FAILED: i32 = 2;
