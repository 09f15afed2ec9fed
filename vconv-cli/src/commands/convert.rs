//! Implementation of the 'convert' subcommand.
//!
//! The batch runs on a worker thread started by the orchestrator. This
//! thread owns the `ControlState` and the progress bar, and applies the
//! events it receives over a channel until the run's terminal event.

use crate::cli::ConvertArgs;
use crate::commands::{EXIT_FILES_FAILED, EXIT_NOT_RUN, EXIT_OK};
use crate::output::Printer;
use crate::progress::BatchProgress;

use vconv_core::{
    BatchResult, ChannelEventHandler, ControlState, ConversionOrchestrator, CoreConfig, CoreError,
    CoreResult, Event, EventDispatcher, JsonEventHandler, Notice, SidecarSpawner,
};

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

/// How long the event loop waits before checking the channel again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Core configuration from the command-line flags.
pub fn build_config(args: &ConvertArgs) -> CoreConfig {
    CoreConfig {
        encoder: args.encoder.clone(),
        log_dir: args.log_dir.clone(),
        overwrite: !args.no_overwrite,
        ..CoreConfig::default()
    }
}

/// Control state holding the selections made on the command line.
pub fn control_state(args: &ConvertArgs) -> ControlState {
    let mut state = ControlState::new();
    if let Some(dir) = &args.input_dir {
        state.select_directory(dir.clone());
    }
    if let Some(codec) = args.codec {
        state.select_codec(codec);
    }
    if let Some(profile) = args.profile {
        state.select_profile(profile);
        if args.codec.is_some() && !state.profile_selectable() {
            log::warn!("--profile only applies to prores_ks; ignoring {}", profile);
        }
    }
    state
}

/// Disables the controls for a new run, or explains why it cannot start.
pub fn begin_run(state: &mut ControlState) -> Result<(), Notice> {
    if state.begin_run() {
        Ok(())
    } else {
        Err(Notice::Blocking {
            message: CoreError::RunInProgress.to_string(),
        })
    }
}

pub fn exit_code(outcome: &CoreResult<BatchResult>) -> i32 {
    match outcome {
        Ok(result) if result.has_failures() => EXIT_FILES_FAILED,
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_NOT_RUN,
    }
}

pub fn run_convert(args: &ConvertArgs) -> i32 {
    let printer = Printer::new(args.json);
    let mut state = control_state(args);

    let orchestrator = match ConversionOrchestrator::new(SidecarSpawner, build_config(args)) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            printer.notice(&state.fail_to_start(&e));
            return EXIT_NOT_RUN;
        }
    };

    let (tx, rx) = mpsc::channel();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(ChannelEventHandler::new(tx)));
    if args.json {
        dispatcher.add_handler(Arc::new(JsonEventHandler::new()));
    }

    if let Err(notice) = begin_run(&mut state) {
        printer.notice(&notice);
        return EXIT_NOT_RUN;
    }
    let handle = match orchestrator.spawn(state.request(), dispatcher) {
        Ok(handle) => handle,
        Err(e) => {
            printer.notice(&state.fail_to_start(&e));
            return EXIT_NOT_RUN;
        }
    };

    let progress = BatchProgress::new(!args.json);
    drain_events(&rx, &mut state, &progress, &printer);
    progress.finish();

    let outcome = handle.join();
    // A worker that died without a terminal event left the controls disabled
    if let (Err(e), false) = (&outcome, state.controls_enabled()) {
        printer.notice(&state.fail_to_start(e));
    }
    exit_code(&outcome)
}

/// Applies events until the run's terminal event or until the worker is gone.
fn drain_events(
    rx: &Receiver<Event>,
    state: &mut ControlState,
    progress: &BatchProgress,
    printer: &Printer,
) {
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(event) => {
                if let Event::BatchStarted {
                    total,
                    output_dir,
                    log_path,
                } = &event
                {
                    progress.suspend(|| {
                        printer.heading("Converting");
                        printer.info("Files", total);
                        printer.info("Output", output_dir.display());
                        printer.info("Log", log_path.display());
                    });
                }

                progress.update(&event);
                if let Some(notice) = state.apply(&event) {
                    progress.suspend(|| printer.notice(&notice));
                }
                if event.is_terminal() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
