// ============================================================================
// vconv-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vconv Core Library
//
// Batch-level failures (no directory, no files, no codec, encoder missing,
// output directory not creatable) are fatal to a run and surface as
// `CoreError`. Per-job encoder failures are never errors at this level: the
// orchestrator records them as failed outcomes and keeps going.

use std::io;

use thiserror::Error;

/// Errors produced by the vconv core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The request carried no input directory.
    #[error("No folder selected")]
    NoInput,

    /// The input directory holds no file with a supported video extension.
    #[error("No video files found in the selected folder")]
    NoFilesFound,

    /// The request carried no codec.
    #[error("No codec selected")]
    InvalidCodec,

    #[error("Path error: {0}")]
    PathError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The encoder binary could not be found.
    #[error("Required encoder '{0}' not found. Install it or pass its path with --encoder")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    /// Another run is already in flight on the same orchestrator.
    #[error("A conversion is already running")]
    RunInProgress,

    #[error("Diagnostic log error: {0}")]
    Log(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Conversion worker thread panicked")]
    WorkerPanicked,
}

impl CoreError {
    /// Whether this error stops a run before any job is attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CoreError::NoInput
                | CoreError::NoFilesFound
                | CoreError::InvalidCodec
                | CoreError::PathError(_)
                | CoreError::DependencyNotFound(_)
                | CoreError::Config(_)
        )
    }
}

/// Result type for vconv core operations.
pub type CoreResult<T> = Result<T, CoreError>;

pub fn command_start_error(command: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), error)
}

pub fn command_wait_error(command: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), error)
}
