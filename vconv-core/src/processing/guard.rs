//! One-run-at-a-time guard for the orchestrator.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CoreError, CoreResult};

/// Shared flag marking an in-flight run. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    running: Arc<AtomicBool>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, failing with `RunInProgress` if it is already held.
    pub fn try_acquire(&self) -> CoreResult<RunToken> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::RunInProgress)?;
        Ok(RunToken {
            running: Arc::clone(&self.running),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Proof of a held guard. Dropping it releases the guard, also on unwind.
#[derive(Debug)]
pub struct RunToken {
    running: Arc<AtomicBool>,
}

impl Drop for RunToken {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
