// vconv-cli/tests/control_flow_tests.rs
//
// Follows a mocked batch the way the convert command does: claim the
// controls, start the run on the worker, fold every event into the state.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use tempfile::tempdir;
use vconv_cli::commands::convert::begin_run;
use vconv_core::external::mocks::{MockEncoderSpawner, error_line};
use vconv_core::{
    ChannelEventHandler, Codec, ControlState, ConversionOrchestrator, CoreConfig, Event,
    EventDispatcher, Notice,
};

fn create_dummy_file(dir: &Path, filename: &str) {
    std::fs::write(dir.join(filename), b"dummy content").unwrap();
}

#[test]
fn test_mocked_batch_drives_control_state() {
    let input = tempdir().unwrap();
    create_dummy_file(input.path(), "good.mp4");
    create_dummy_file(input.path(), "bad.avi");

    let spawner = MockEncoderSpawner::new();
    spawner.add_success_expectation("good.mp4", vec![]);
    spawner.add_exit_error_expectation("bad.avi", vec![error_line("moov atom not found")], 1);
    let orchestrator = ConversionOrchestrator::new(spawner.clone(), CoreConfig::default()).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(ChannelEventHandler::new(tx)));

    let mut state = ControlState::new();
    state.select_directory(input.path());
    state.select_codec(Codec::Libx264);
    begin_run(&mut state).unwrap();
    assert!(begin_run(&mut state).is_err());

    let handle = orchestrator.spawn(state.request(), dispatcher).unwrap();

    let mut notices = Vec::new();
    loop {
        let event = rx.recv().unwrap();
        let terminal = event.is_terminal();
        notices.extend(state.apply(&event));
        if terminal {
            break;
        }
    }
    let result = handle.join().unwrap();

    assert_eq!(result.failed(), 1);
    assert_eq!(state.progress(), (2, 2));
    assert_eq!(state.failed_files(), &["bad.avi".to_string()]);
    assert!(state.controls_enabled());
    assert_eq!(spawner.pending_expectations(), 0);

    assert_eq!(notices.len(), 2);
    assert!(matches!(&notices[0], Notice::FileFailed { filename, .. } if filename == "bad.avi"));
    match &notices[1] {
        Notice::Summary { log_path, .. } => assert_eq!(log_path.as_ref(), Some(&result.log_path)),
        other => panic!("expected summary, got {other:?}"),
    }
}

#[test]
fn test_mocked_missing_encoder_ends_with_blocking_notice() {
    let input = tempdir().unwrap();
    create_dummy_file(input.path(), "clip.mkv");

    let spawner = MockEncoderSpawner::new();
    spawner.set_encoder_missing(true);
    let orchestrator = ConversionOrchestrator::new(spawner, CoreConfig::default()).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(ChannelEventHandler::new(tx)));

    let mut state = ControlState::new();
    state.select_directory(input.path());
    state.select_codec(Codec::ProresKs);
    begin_run(&mut state).unwrap();

    let handle = orchestrator.spawn(state.request(), dispatcher).unwrap();
    let event = rx.recv().unwrap();
    assert!(matches!(event, Event::BatchFailed { .. }));

    let notice = state.apply(&event).unwrap();
    assert!(notice.is_blocking());
    assert!(state.controls_enabled());
    assert!(handle.join().is_err());
    assert!(!input.path().join("converted").exists());
}
