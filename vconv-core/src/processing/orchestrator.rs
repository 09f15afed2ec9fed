// ============================================================================
// vconv-core/src/processing/orchestrator.rs
// ============================================================================
//
// BATCH ORCHESTRATION: Sequential Conversion of a Folder of Videos
//
// This module contains the ConversionOrchestrator, which turns a
// ConversionRequest into one encoder invocation per matching file and
// collects the outcomes into a BatchResult.
//
// KEY COMPONENTS:
// - ConversionOrchestrator: owns the spawner, the configuration and the run guard
// - RunHandle: join handle of a run started on a worker thread
//
// WORKFLOW:
// 1. Validate the request (codec, then input directory)
// 2. Enumerate jobs from the input directory
// 3. Check that the encoder can be started
// 4. Create the output directory and open the run's diagnostic log
// 5. For each job: build the command, run the encoder, record the outcome,
//    report progress. A failed job never stops the batch.
// 6. Release the run guard and emit exactly one terminal event
//
// Jobs run strictly one after another; there is no cancellation.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::discovery::enumerate_jobs;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, EventHandler};
use crate::external::{EncodeCommandBuilder, EncoderSpawner, output_path_for, run_encode};
use crate::file_logging::RunLog;
use crate::processing::guard::{RunGuard, RunToken};
use crate::request::{BatchResult, ConversionOutcome, ConversionRequest, Job};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Runs batches of conversions with a given encoder spawner.
///
/// Clones share the spawner, the configuration and the run guard, so at
/// most one run is in flight across all clones.
pub struct ConversionOrchestrator<S> {
    spawner: Arc<S>,
    config: Arc<CoreConfig>,
    guard: RunGuard,
}

impl<S> Clone for ConversionOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            spawner: Arc::clone(&self.spawner),
            config: Arc::clone(&self.config),
            guard: self.guard.clone(),
        }
    }
}

/// A run whose preconditions all hold.
struct PreparedRun {
    jobs: Vec<Job>,
    output_dir: PathBuf,
    run_log: RunLog,
}

/// Sends every run event to the diagnostic log and to the caller.
struct Reporter<'a> {
    run_log: &'a RunLog,
    dispatcher: &'a EventDispatcher,
}

impl Reporter<'_> {
    fn emit(&self, event: Event) {
        self.run_log.handle(&event);
        self.dispatcher.emit(event);
    }
}

impl<S: EncoderSpawner> ConversionOrchestrator<S> {
    /// Creates an orchestrator after validating `config`.
    pub fn new(spawner: S, config: CoreConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            spawner: Arc::new(spawner),
            config: Arc::new(config),
            guard: RunGuard::new(),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Whether a run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.guard.is_running()
    }

    /// Runs a whole batch on the calling thread.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchResult)` - Once every job was attempted, failed ones included
    /// * `Err(CoreError::RunInProgress)` - If another run holds the guard; nothing is emitted
    /// * `Err(e)` - A precondition failure, or an encoder that could no longer be started
    ///
    /// Every call that gets past the run guard emits exactly one
    /// `BatchComplete` or `BatchFailed`, after the guard is released.
    pub fn run(
        &self,
        request: &ConversionRequest,
        dispatcher: &EventDispatcher,
    ) -> CoreResult<BatchResult> {
        let token = self.guard.try_acquire()?;
        self.run_with_token(token, request, dispatcher)
    }

    fn run_with_token(
        &self,
        token: RunToken,
        request: &ConversionRequest,
        dispatcher: &EventDispatcher,
    ) -> CoreResult<BatchResult> {
        let outcome = self.execute(request, dispatcher);
        drop(token);

        match &outcome {
            Ok(result) => dispatcher.emit(Event::BatchComplete {
                result: result.clone(),
            }),
            Err(e) => dispatcher.emit(Event::BatchFailed {
                message: e.to_string(),
            }),
        }
        outcome
    }

    fn prepare(&self, request: &ConversionRequest) -> CoreResult<PreparedRun> {
        let codec = request.codec.ok_or(CoreError::InvalidCodec)?;
        let input_dir = request
            .input_directory
            .as_deref()
            .ok_or(CoreError::NoInput)?;

        let jobs = enumerate_jobs(input_dir, codec, request.effective_profile())?;

        self.spawner.check_available(&self.config.encoder)?;

        let output_dir = self.config.output_dir_for(input_dir);
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to create output directory '{}': {}",
                output_dir.display(),
                e
            ))
        })?;

        let run_log = RunLog::open(&self.config.log_dir_for(&output_dir))?;

        Ok(PreparedRun {
            jobs,
            output_dir,
            run_log,
        })
    }

    fn execute(
        &self,
        request: &ConversionRequest,
        dispatcher: &EventDispatcher,
    ) -> CoreResult<BatchResult> {
        let PreparedRun {
            jobs,
            output_dir,
            run_log,
        } = self.prepare(request).inspect_err(|e| {
            log::debug!("Conversion not started: {}", e);
        })?;

        let total = jobs.len();
        let reporter = Reporter {
            run_log: &run_log,
            dispatcher,
        };
        reporter.emit(Event::BatchStarted {
            total,
            output_dir: output_dir.clone(),
            log_path: run_log.path().to_path_buf(),
        });

        let builder = EncodeCommandBuilder::new(self.config.encoder.clone())
            .with_overwrite(self.config.overwrite);

        match self.convert_all(&builder, &jobs, &output_dir, &reporter) {
            Ok(outcomes) => {
                let result = BatchResult {
                    output_directory: output_dir,
                    log_path: run_log.path().to_path_buf(),
                    total,
                    outcomes,
                };
                run_log.log_completion(&result);
                Ok(result)
            }
            Err(e) => {
                run_log.log_abort(&e.to_string());
                Err(e)
            }
        }
    }

    fn convert_all(
        &self,
        builder: &EncodeCommandBuilder,
        jobs: &[Job],
        output_dir: &Path,
        reporter: &Reporter<'_>,
    ) -> CoreResult<Vec<ConversionOutcome>> {
        let total = jobs.len();

        jobs.iter().enumerate().try_fold(
            Vec::with_capacity(total),
            |mut outcomes, (index, job)| {
                reporter.emit(Event::JobStarted {
                    index: index + 1,
                    total,
                    source: job.source_path().to_path_buf(),
                });

                let outcome = self.convert_job(builder, job, output_dir)?;

                if outcome.is_success() {
                    reporter.emit(Event::JobSucceeded {
                        source: job.source_path().to_path_buf(),
                        output: outcome.output_path.clone(),
                        elapsed: outcome.elapsed,
                    });
                } else {
                    reporter.emit(Event::JobFailed {
                        source: job.source_path().to_path_buf(),
                        filename: job.file_name(),
                        message: outcome.diagnostic.clone().unwrap_or_default(),
                    });
                }

                outcomes.push(outcome);
                reporter.emit(Event::Progress {
                    completed: outcomes.len(),
                    total,
                });
                Ok(outcomes)
            },
        )
    }

    /// Converts one job.
    ///
    /// A non-zero encoder exit is a failed outcome, not an error. Only an
    /// encoder that cannot be started at all is returned as `Err`.
    fn convert_job(
        &self,
        builder: &EncodeCommandBuilder,
        job: &Job,
        output_dir: &Path,
    ) -> CoreResult<ConversionOutcome> {
        let output_path = output_path_for(output_dir, job.source_path(), job.codec());
        let cmd = builder.build(job, &output_path);
        let started = Instant::now();

        match run_encode(self.spawner.as_ref(), &cmd) {
            Ok(captured) if captured.success() => Ok(ConversionOutcome::success(
                job.clone(),
                output_path,
                started.elapsed(),
            )),
            Ok(captured) => Ok(ConversionOutcome::failed(
                job.clone(),
                output_path,
                captured.diagnostic(),
                started.elapsed(),
            )),
            Err(e @ (CoreError::CommandStart(..) | CoreError::DependencyNotFound(_))) => Err(e),
            Err(e) => Ok(ConversionOutcome::failed(
                job.clone(),
                output_path,
                e.to_string(),
                started.elapsed(),
            )),
        }
    }
}

impl<S: EncoderSpawner + Send + Sync + 'static> ConversionOrchestrator<S> {
    /// Starts a run on a worker thread and returns immediately.
    ///
    /// The run guard is claimed before the thread starts, so a second call
    /// fails with `RunInProgress` right away. Progress reaches the caller
    /// only through `dispatcher`.
    pub fn spawn(
        &self,
        request: ConversionRequest,
        dispatcher: EventDispatcher,
    ) -> CoreResult<RunHandle> {
        let token = self.guard.try_acquire()?;
        let worker = self.clone();
        let failure_dispatcher = dispatcher.clone();

        let spawned = thread::Builder::new()
            .name("vconv-worker".to_string())
            .spawn(move || worker.run_with_token(token, &request, &dispatcher));

        match spawned {
            Ok(handle) => Ok(RunHandle { handle }),
            Err(e) => {
                let error = CoreError::Io(e);
                failure_dispatcher.emit(Event::BatchFailed {
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }
}

/// Handle to a run started with [`ConversionOrchestrator::spawn`].
pub struct RunHandle {
    handle: JoinHandle<CoreResult<BatchResult>>,
}

impl RunHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns the run's result.
    pub fn join(self) -> CoreResult<BatchResult> {
        self.handle.join().map_err(|_| CoreError::WorkerPanicked)?
    }
}
