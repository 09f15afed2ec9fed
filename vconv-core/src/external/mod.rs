// ============================================================================
// vconv-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the External Encoder
//
// This module encapsulates everything that touches the encoder binary:
// building its command line, checking that it can be started, spawning it
// and collecting its output.
//
// KEY COMPONENTS:
// - EncodeCommand / EncodeCommandBuilder: per-job command lines
// - EncoderSpawner / EncoderProcess: traits for spawning the encoder
// - SidecarSpawner: default implementation on top of ffmpeg-sidecar
// - check_dependency: start-up probe for the encoder binary
//
// DESIGN PHILOSOPHY:
// Consumers pass an EncoderSpawner into the orchestrator, so tests can
// replace the encoder with scripted processes.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Encoder command lines and output naming
pub mod command;

/// Traits and implementations for executing encoder commands
pub mod ffmpeg_executor;

/// Scripted spawner used by tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use command::{EncodeCommand, EncodeCommandBuilder, output_path_for};
pub use ffmpeg_executor::{
    CapturedOutput, EncoderProcess, EncoderSpawner, SidecarProcess, SidecarSpawner, run_encode,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that the encoder can be started.
///
/// Runs `<program> -version` with output discarded. The exit status is not
/// inspected: any process that starts counts as available.
///
/// # Returns
///
/// * `Ok(())` - If the program started
/// * `Err(CoreError::DependencyNotFound)` - If the program does not exist
/// * `Err(CoreError::CommandStart)` - If it exists but cannot be started
pub fn check_dependency(program: &Path) -> CoreResult<()> {
    let name = program.display().to_string();

    let result = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found encoder: {}", name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Encoder '{}' not found", name);
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::debug!("Failed to start encoder check '{}': {}", name, e);
            Err(CoreError::CommandStart(name, e))
        }
    }
}
