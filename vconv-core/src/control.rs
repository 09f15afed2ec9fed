// ============================================================================
// vconv-core/src/control.rs
// ============================================================================
//
// CONTROL STATE: Application State of the Control Surface
//
// ControlState holds what the user selected (folder, codec, profile) and what
// the surface currently shows (enabled controls, progress, failed files). It
// is owned by the thread that drives the UI and only changes through
// `apply`, which folds run events into the state and says which message, if
// any, the user should see.
//
// KEY COMPONENTS:
// - ControlState: selections, controls flag, progress counters, last result
// - Notice: user-visible message classes (blocking, per-file, summary)

use std::path::PathBuf;

use crate::codec::{Codec, ProresProfile};
use crate::error::CoreError;
use crate::events::Event;
use crate::request::{BatchResult, ConversionRequest};
use crate::utils::last_lines;

/// Encoder output lines shown with a per-file failure. The run log keeps all of them.
pub const NOTICE_DIAGNOSTIC_LINES: usize = 10;

/// A message the control surface should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A batch-level problem. The run did not start or was aborted.
    Blocking { message: String },

    /// One file failed; the batch keeps going.
    FileFailed { filename: String, message: String },

    /// End of a completed run.
    Summary {
        message: String,
        output_directory: PathBuf,
        /// Set only when at least one file failed.
        log_path: Option<PathBuf>,
    },
}

impl Notice {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Notice::Blocking { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ControlState {
    input_directory: Option<PathBuf>,
    codec: Option<Codec>,
    profile: Option<ProresProfile>,
    controls_enabled: bool,
    completed: usize,
    total: usize,
    failed_files: Vec<String>,
    last_result: Option<BatchResult>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            input_directory: None,
            codec: None,
            profile: None,
            controls_enabled: true,
            completed: 0,
            total: 0,
            failed_files: Vec::new(),
            last_result: None,
        }
    }
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_directory(&mut self, directory: impl Into<PathBuf>) {
        self.input_directory = Some(directory.into());
    }

    pub fn select_codec(&mut self, codec: Codec) {
        self.codec = Some(codec);
    }

    pub fn select_profile(&mut self, profile: ProresProfile) {
        self.profile = Some(profile);
    }

    /// The profile selector only applies to `prores_ks`.
    pub fn profile_selectable(&self) -> bool {
        self.codec.is_some_and(Codec::supports_profile)
    }

    /// Request built from the current selections.
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            input_directory: self.input_directory.clone(),
            codec: self.codec,
            profile: self.profile.filter(|_| self.profile_selectable()),
        }
    }

    /// Disables the controls for a new run.
    ///
    /// Returns `false`, changing nothing, when a run is already active.
    #[must_use]
    pub fn begin_run(&mut self) -> bool {
        if !self.controls_enabled {
            return false;
        }
        self.controls_enabled = false;
        self.completed = 0;
        self.total = 0;
        self.failed_files.clear();
        true
    }

    /// Folds a run event into the state.
    ///
    /// Controls are re-enabled on the first terminal event only; a terminal
    /// event arriving while they are already enabled yields no notice.
    pub fn apply(&mut self, event: &Event) -> Option<Notice> {
        match event {
            Event::BatchStarted { total, .. } => {
                self.total = *total;
                self.completed = 0;
                None
            }
            Event::JobStarted { .. } | Event::JobSucceeded { .. } => None,
            Event::JobFailed {
                filename, message, ..
            } => {
                self.failed_files.push(filename.clone());
                Some(Notice::FileFailed {
                    filename: filename.clone(),
                    message: format!(
                        "Failed to convert {}. Continuing with other files.\n{}",
                        filename,
                        last_lines(message, NOTICE_DIAGNOSTIC_LINES)
                    ),
                })
            }
            Event::Progress { completed, total } => {
                self.completed = *completed;
                self.total = *total;
                None
            }
            Event::BatchComplete { result } => {
                if self.controls_enabled {
                    return None;
                }
                self.controls_enabled = true;
                let notice = summary_notice(result);
                self.last_result = Some(result.clone());
                Some(notice)
            }
            Event::BatchFailed { message } => {
                if self.controls_enabled {
                    return None;
                }
                self.controls_enabled = true;
                Some(Notice::Blocking {
                    message: message.clone(),
                })
            }
        }
    }

    /// Records a run that could not be started at all.
    pub fn fail_to_start(&mut self, error: &CoreError) -> Notice {
        self.controls_enabled = true;
        Notice::Blocking {
            message: error.to_string(),
        }
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// `(completed, total)` of the current or last run.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.total)
    }

    pub fn failed_files(&self) -> &[String] {
        &self.failed_files
    }

    pub fn last_result(&self) -> Option<&BatchResult> {
        self.last_result.as_ref()
    }
}

fn summary_notice(result: &BatchResult) -> Notice {
    if result.has_failures() {
        Notice::Summary {
            message: format!(
                "Conversion finished: {} of {} file(s) converted, {} failed. Files saved in: {}. See {} for details.",
                result.succeeded(),
                result.total,
                result.failed(),
                result.output_directory.display(),
                result.log_path.display()
            ),
            output_directory: result.output_directory.clone(),
            log_path: Some(result.log_path.clone()),
        }
    } else {
        Notice::Summary {
            message: format!(
                "Conversion completed! Files saved in: {}",
                result.output_directory.display()
            ),
            output_directory: result.output_directory.clone(),
            log_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ConversionOutcome, Job};
    use std::time::Duration;

    fn result_with(failed: usize, ok: usize) -> BatchResult {
        let mut outcomes = Vec::new();
        for i in 0..ok {
            let job = Job::new(PathBuf::from(format!("/v/ok{i}.mp4")), Codec::Libx264, None);
            outcomes.push(ConversionOutcome::success(job, PathBuf::from("/v/converted/x.mov"), Duration::ZERO));
        }
        for i in 0..failed {
            let job = Job::new(PathBuf::from(format!("/v/bad{i}.mp4")), Codec::Libx264, None);
            outcomes.push(ConversionOutcome::failed(
                job,
                PathBuf::from("/v/converted/y.mov"),
                "broken".to_string(),
                Duration::ZERO,
            ));
        }
        BatchResult {
            output_directory: PathBuf::from("/v/converted"),
            log_path: PathBuf::from("/v/converted/conversion_errors_20240101_000000.log"),
            total: ok + failed,
            outcomes,
        }
    }

    #[test]
    fn test_profile_only_selectable_for_prores() {
        let mut state = ControlState::new();
        assert!(!state.profile_selectable());

        state.select_directory("/videos");
        state.select_profile(ProresProfile::Lt);
        state.select_codec(Codec::Libx264);
        assert!(!state.profile_selectable());
        assert_eq!(state.request().profile, None);

        state.select_codec(Codec::ProresKs);
        assert!(state.profile_selectable());
        assert_eq!(state.request().profile, Some(ProresProfile::Lt));
        assert_eq!(state.request().input_directory, Some(PathBuf::from("/videos")));
    }

    #[test]
    fn test_run_lifecycle_reenables_once() {
        let mut state = ControlState::new();
        assert!(state.begin_run());
        assert!(!state.controls_enabled());
        assert!(!state.begin_run());

        state.apply(&Event::BatchStarted {
            total: 2,
            output_dir: PathBuf::from("/v/converted"),
            log_path: PathBuf::from("/v/converted/x.log"),
        });
        let notice = state.apply(&Event::JobFailed {
            source: PathBuf::from("/v/bad0.mp4"),
            filename: "bad0.mp4".to_string(),
            message: "broken".to_string(),
        });
        assert!(matches!(notice, Some(Notice::FileFailed { ref filename, .. }) if filename == "bad0.mp4"));
        state.apply(&Event::Progress {
            completed: 2,
            total: 2,
        });
        assert_eq!(state.progress(), (2, 2));

        let result = result_with(2, 0);
        let summary = state.apply(&Event::BatchComplete {
            result: result.clone(),
        });
        assert!(state.controls_enabled());
        match summary {
            Some(Notice::Summary { log_path, .. }) => assert!(log_path.is_some()),
            other => panic!("expected summary, got {other:?}"),
        }

        assert_eq!(state.apply(&Event::BatchComplete { result }), None);
        assert_eq!(state.failed_files(), &["bad0.mp4".to_string()]);
    }

    #[test]
    fn test_file_failure_notice_shows_diagnostic_tail() {
        let mut state = ControlState::new();
        assert!(state.begin_run());
        let message: Vec<String> = (1..=25).map(|i| format!("line {i}")).collect();

        let notice = state.apply(&Event::JobFailed {
            source: PathBuf::from("/v/bad.mkv"),
            filename: "bad.mkv".to_string(),
            message: message.join("\n"),
        });

        let Some(Notice::FileFailed { message, .. }) = notice else {
            panic!("expected a file failure notice");
        };
        let detail: Vec<&str> = message.lines().skip(1).collect();
        assert_eq!(detail.len(), NOTICE_DIAGNOSTIC_LINES);
        assert_eq!(detail.first(), Some(&"line 16"));
        assert_eq!(detail.last(), Some(&"line 25"));
    }

    #[test]
    fn test_clean_run_summary_has_no_log_path() {
        let mut state = ControlState::new();
        assert!(state.begin_run());
        let notice = state.apply(&Event::BatchComplete {
            result: result_with(0, 3),
        });
        match notice {
            Some(Notice::Summary {
                message, log_path, ..
            }) => {
                assert!(message.contains("/v/converted"));
                assert!(log_path.is_none());
            }
            other => panic!("expected summary, got {other:?}"),
        }
        assert!(state.last_result().is_some());
    }

    #[test]
    fn test_precondition_failure_is_blocking() {
        let mut state = ControlState::new();
        assert!(state.begin_run());
        let notice = state.apply(&Event::BatchFailed {
            message: CoreError::NoFilesFound.to_string(),
        });
        assert!(notice.unwrap().is_blocking());
        assert!(state.controls_enabled());

        assert!(state.begin_run());
        let notice = state.fail_to_start(&CoreError::RunInProgress);
        assert!(notice.is_blocking());
        assert!(state.controls_enabled());
    }
}
