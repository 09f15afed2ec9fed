//! Batch conversion orchestration.
//!
//! This module drives a whole run: precondition checks, job enumeration,
//! one encoder invocation per job, failure isolation and event reporting.

/// Main batch conversion logic
pub mod orchestrator;

/// Single in-flight run enforcement
pub mod guard;

pub use guard::{RunGuard, RunToken};
pub use orchestrator::{ConversionOrchestrator, RunHandle};
