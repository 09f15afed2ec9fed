// vconv-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::{EncodeCommand, EncoderProcess, EncoderSpawner};
use crate::error::{CoreError, CoreResult, command_wait_error};
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Encoder error line as ffmpeg-sidecar reports it.
pub fn error_line(text: &str) -> FfmpegEvent {
    FfmpegEvent::Log(LogLevel::Error, text.to_string())
}

/// Regular encoder output line.
pub fn info_line(text: &str) -> FfmpegEvent {
    FfmpegEvent::Log(LogLevel::Info, text.to_string())
}

/// Mock implementation of EncoderProcess.
#[derive(Clone)]
pub struct MockEncoderProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
    /// Fail reading the output after the events were emitted.
    pub break_output: bool,
    waits: Arc<AtomicUsize>,
    kills: Arc<AtomicUsize>,
}

impl MockEncoderProcess {
    pub fn new(events_to_emit: Vec<FfmpegEvent>, exit_status: ExitStatus) -> Self {
        Self {
            events_to_emit,
            exit_status,
            break_output: false,
            waits: Arc::default(),
            kills: Arc::default(),
        }
    }
}

impl EncoderProcess for MockEncoderProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        if self.break_output {
            return Err(command_wait_error(
                "mock encoder",
                io::Error::other("output stream closed"),
            ));
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.waits.fetch_add(1, Ordering::SeqCst);
        Ok(self.exit_status)
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.kills.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// An expected encoder call and its mock result.
pub struct MockEncoderExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockEncoderProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of EncoderSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern is contained in
/// one of the command's arguments. A spawn without a matching expectation
/// panics.
#[derive(Clone, Default)]
pub struct MockEncoderSpawner {
    expectations: Arc<Mutex<Vec<MockEncoderExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
    encoder_missing: Arc<Mutex<bool>>,
    waits: Arc<AtomicUsize>,
    kills: Arc<AtomicUsize>,
}

impl MockEncoderSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockEncoderProcess>,
        create_dummy_output: bool,
    ) {
        if let Ok(mut expectations) = self.expectations.lock() {
            expectations.push(MockEncoderExpectation {
                arg_pattern: arg_pattern.to_string(),
                result,
                create_dummy_output,
            });
        }
    }

    pub fn add_success_expectation(&self, arg_pattern: &str, events: Vec<FfmpegEvent>) {
        let process = MockEncoderProcess::new(events, exit_status(0));
        self.add_expectation(arg_pattern, Ok(process), true);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockEncoderProcess::new(events, exit_status(exit_code));
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    /// The encoder starts, then its output can no longer be read.
    pub fn add_broken_output_expectation(&self, arg_pattern: &str, events: Vec<FfmpegEvent>) {
        let mut process = MockEncoderProcess::new(events, exit_status(0));
        process.break_output = true;
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    /// Makes `check_available` report the encoder as missing.
    pub fn set_encoder_missing(&self, missing: bool) {
        if let Ok(mut flag) = self.encoder_missing.lock() {
            *flag = missing;
        }
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of `wait` calls made on spawned processes.
    pub fn wait_count(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }

    /// Number of `kill` calls made on spawned processes.
    pub fn kill_count(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }

    /// Number of expectations not consumed yet.
    pub fn pending_expectations(&self) -> usize {
        self.expectations.lock().map(|e| e.len()).unwrap_or(0)
    }
}

fn create_dummy_output(output_path: &Path) {
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("MockEncoderSpawner failed to create parent dir {:?}: {}", parent, e);
        }
    }
    match std::fs::File::create(output_path) {
        Ok(_) => log::debug!("MockEncoderSpawner created dummy output file: {:?}", output_path),
        Err(e) => log::error!(
            "MockEncoderSpawner failed to create dummy output file {:?}: {}",
            output_path,
            e
        ),
    }
}

impl EncoderSpawner for MockEncoderSpawner {
    type Process = MockEncoderProcess;

    fn check_available(&self, program: &Path) -> CoreResult<()> {
        let missing = self.encoder_missing.lock().map(|f| *f).unwrap_or(false);
        if missing {
            Err(CoreError::DependencyNotFound(program.display().to_string()))
        } else {
            Ok(())
        }
    }

    fn spawn(&self, cmd: &EncodeCommand) -> CoreResult<Self::Process> {
        let args = cmd.args().to_vec();
        if let Ok(mut calls) = self.received_calls.lock() {
            calls.push(args.clone());
        }

        let expectation = {
            let mut expectations = match self.expectations.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let found_index = expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));
            found_index.map(|index| expectations.remove(index))
        };

        let Some(expectation) = expectation else {
            log::error!("MockEncoderSpawner: No expectation found for command args: {:?}", args);
            panic!("MockEncoderSpawner: No expectation found for command args: {:?}", args);
        };

        log::debug!(
            "MockEncoderSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        match expectation.result {
            Ok(mut process) => {
                process.waits = Arc::clone(&self.waits);
                process.kills = Arc::clone(&self.kills);
                if expectation.create_dummy_output {
                    create_dummy_output(cmd.output_path());
                }
                Ok(process)
            }
            Err(err) => {
                log::debug!(
                    "MockEncoderSpawner simulating spawn error for pattern '{}': {:?}",
                    expectation.arg_pattern,
                    err
                );
                Err(err)
            }
        }
    }
}
