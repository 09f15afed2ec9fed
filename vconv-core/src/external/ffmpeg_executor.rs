// ============================================================================
// vconv-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// ENCODER EXECUTOR: Encoder Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with the
// encoder process. It defines traits and implementations for executing encode
// commands and collecting their output.
//
// KEY COMPONENTS:
// - EncoderProcess: Trait representing an active encoder process
// - EncoderSpawner: Trait for creating new encoder processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - run_encode: Runs one command to completion and captures its output
//
// ARCHITECTURE:
// The orchestrator is generic over EncoderSpawner so tests can substitute a
// scripted spawner for the real encoder.

use crate::error::{CoreResult, command_start_error, command_wait_error};
use crate::external::check_dependency;
use crate::external::command::EncodeCommand;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use std::io;
use std::path::Path;
use std::process::ExitStatus;

// --- Encoder Execution Abstraction ---

/// Trait representing an active encoder process instance.
pub trait EncoderProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;

    /// Stops the command without waiting for it.
    fn kill(&mut self) -> CoreResult<()>;
}

/// Trait representing something that can spawn an EncoderProcess.
pub trait EncoderSpawner {
    type Process: EncoderProcess;

    /// Verifies that `program` can be started at all.
    fn check_available(&self, program: &Path) -> CoreResult<()> {
        check_dependency(program)
    }

    /// Starts the encoder for `cmd`.
    fn spawn(&self, cmd: &EncodeCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `EncoderProcess`.
pub struct SidecarProcess {
    program: String,
    child: FfmpegChild,
}

impl EncoderProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.child.iter().map_err(|e| {
            log::error!("Failed to get encoder event iterator: {}", e);
            command_wait_error(self.program.clone(), io::Error::other(e.to_string()))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.child
            .wait()
            .map_err(|e| command_wait_error(self.program.clone(), e))
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.child
            .kill()
            .map_err(|e| command_wait_error(self.program.clone(), e))
    }
}

/// Concrete implementation of `EncoderSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl EncoderSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, cmd: &EncodeCommand) -> CoreResult<Self::Process> {
        let program = cmd.program().display().to_string();
        let mut ffmpeg = FfmpegCommand::new_with_path(cmd.program());
        ffmpeg.args(cmd.args());

        log::debug!("Spawning encoder: {}", cmd);

        ffmpeg
            .spawn()
            .map(|child| SidecarProcess {
                program: program.clone(),
                child,
            })
            .map_err(|e| command_start_error(program, e))
    }
}

// --- Output Capture ---

/// Exit status and output lines of one finished encoder run.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    /// Lines the encoder flagged as errors.
    pub error_lines: Vec<String>,
    /// Every other output line, in order.
    pub log_lines: Vec<String>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Text describing why the run failed. Never empty.
    ///
    /// Every line the encoder marked as an error, or all of its regular
    /// output when it marked none, or else the exit status itself.
    pub fn diagnostic(&self) -> String {
        let text = if self.error_lines.is_empty() {
            self.log_lines.join("\n")
        } else {
            self.error_lines.join("\n")
        };

        if text.trim().is_empty() {
            format!("encoder exited with {} and produced no output", self.status)
        } else {
            text
        }
    }
}

/// Runs `cmd` to completion, collecting the encoder's output lines.
///
/// A non-zero exit is not an error here: it is reported through
/// `CapturedOutput::status`. Only failing to start, read or wait on the
/// process is returned as `Err`. The process is always reaped.
pub fn run_encode<S: EncoderSpawner>(spawner: &S, cmd: &EncodeCommand) -> CoreResult<CapturedOutput> {
    let mut process = spawner.spawn(cmd)?;

    let mut error_lines = Vec::new();
    let mut log_lines = Vec::new();
    let handled = process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                log::trace!("encoder error: {}", line);
                error_lines.push(line);
            }
            FfmpegEvent::Log(_, line) => {
                log::trace!("encoder: {}", line);
                log_lines.push(line);
            }
            _ => {}
        }
        Ok(())
    });

    if let Err(e) = handled {
        log::debug!("Stopping encoder after output error: {}", e);
        if let Err(kill_err) = process.kill() {
            log::debug!("Failed to stop encoder: {}", kill_err);
        }
        if let Err(wait_err) = process.wait() {
            log::debug!("Failed to reap encoder: {}", wait_err);
        }
        return Err(e);
    }

    let status = process.wait()?;
    Ok(CapturedOutput {
        status,
        error_lines,
        log_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::error::CoreError;
    use crate::external::command::EncodeCommandBuilder;
    use crate::external::mocks::{MockEncoderSpawner, error_line, info_line};
    use crate::request::Job;
    use std::path::PathBuf;

    fn command(name: &str) -> EncodeCommand {
        let job = Job::new(PathBuf::from("/videos").join(name), Codec::Libx264, None);
        EncodeCommandBuilder::new("ffmpeg").build(&job, Path::new("/videos/converted/out.mov"))
    }

    #[test]
    fn test_process_is_reaped_when_output_breaks() {
        let spawner = MockEncoderSpawner::new();
        spawner.add_broken_output_expectation("clip.mp4", vec![info_line("frame=1")]);

        let result = run_encode(&spawner, &command("clip.mp4"));

        assert!(matches!(result, Err(CoreError::CommandWait(..))));
        assert_eq!(spawner.kill_count(), 1);
        assert_eq!(spawner.wait_count(), 1);
    }

    #[test]
    fn test_finished_process_is_waited_once() {
        let spawner = MockEncoderSpawner::new();
        spawner.add_exit_error_expectation("clip.mp4", vec![error_line("boom")], 1);

        let captured = run_encode(&spawner, &command("clip.mp4")).unwrap();

        assert!(!captured.success());
        assert_eq!(captured.diagnostic(), "boom");
        assert_eq!(spawner.wait_count(), 1);
        assert_eq!(spawner.kill_count(), 0);
    }

    #[test]
    fn test_diagnostic_keeps_every_error_line() {
        let spawner = MockEncoderSpawner::new();
        let events = (1..=60).map(|i| error_line(&format!("error line {i}"))).collect();
        spawner.add_exit_error_expectation("clip.mp4", events, 1);

        let diagnostic = run_encode(&spawner, &command("clip.mp4")).unwrap().diagnostic();

        assert_eq!(diagnostic.lines().count(), 60);
        assert!(diagnostic.starts_with("error line 1\n"));
        assert!(diagnostic.ends_with("error line 60"));
    }
}
