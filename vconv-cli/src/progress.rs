// ============================================================================
// vconv-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Batch Progress Bar
//
// Wraps an indicatif ProgressBar counting converted files. It is only ever
// touched from the event loop thread.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use vconv_core::Event;
use vconv_core::utils::file_name_of;

const BAR_TEMPLATE: &str = "  {spinner} [{bar:30}] {pos}/{len} files ({elapsed_precise}) {wide_msg}";

pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a bar. It stays hidden when `visible` is false or stderr is
    /// not a terminal.
    pub fn new(visible: bool) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .map(|s| s.progress_chars("##."))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        if !visible || !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { bar }
    }

    /// Updates the bar from a run event.
    pub fn update(&self, event: &Event) {
        match event {
            Event::BatchStarted { total, .. } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
            Event::JobStarted { source, .. } => {
                self.bar.set_message(file_name_of(source));
            }
            Event::Progress { completed, total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(*completed as u64);
            }
            Event::BatchComplete { .. } | Event::BatchFailed { .. } => {
                self.bar.finish_and_clear();
            }
            Event::JobSucceeded { .. } | Event::JobFailed { .. } => {}
        }
    }

    /// Runs `f` with the bar hidden so printed lines do not tear it.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
