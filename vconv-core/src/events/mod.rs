//! Run notifications.
//!
//! The orchestrator reports everything that happens during a run as an
//! [`Event`] pushed through an [`EventDispatcher`]. Handlers must be
//! `Send + Sync` because runs started with `spawn` emit from a worker thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::request::BatchResult;

pub mod json_handler;

pub use json_handler::JsonEventHandler;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Batch lifecycle
    BatchStarted {
        total: usize,
        output_dir: PathBuf,
        log_path: PathBuf,
    },

    // Per-file events
    JobStarted {
        index: usize, // 1-based
        total: usize,
        source: PathBuf,
    },
    JobSucceeded {
        source: PathBuf,
        output: PathBuf,
        elapsed: Duration,
    },
    JobFailed {
        source: PathBuf,
        filename: String,
        message: String,
    },

    /// Emitted after every job, failed ones included.
    Progress {
        completed: usize,
        total: usize,
    },

    // Terminal events, exactly one per run
    BatchComplete {
        result: BatchResult,
    },
    BatchFailed {
        message: String,
    },
}

impl Event {
    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::BatchComplete { .. } | Event::BatchFailed { .. })
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

#[derive(Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Forwards every event into an mpsc channel.
///
/// The receiving side owns all state updates; a dropped receiver only means
/// nobody is listening any more, so send failures are ignored.
pub struct ChannelEventHandler {
    sender: Sender<Event>,
}

impl ChannelEventHandler {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl EventHandler for ChannelEventHandler {
    fn handle(&self, event: &Event) {
        if self.sender.send(event.clone()).is_err() {
            log::debug!("Event receiver dropped; discarding {:?}", event);
        }
    }
}
