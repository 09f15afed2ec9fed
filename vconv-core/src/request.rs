// ============================================================================
// vconv-core/src/request.rs
// ============================================================================
//
// DATA MODEL: Requests, Jobs, Outcomes and Batch Results
//
// A ConversionRequest is what the control surface hands to the orchestrator.
// The JobEnumerator turns it into one Job per matching file; each Job yields
// exactly one ConversionOutcome, and the outcomes of a run are collected, in
// enumeration order, into a BatchResult.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::{Codec, ProresProfile};
use crate::utils::file_name_of;

// ============================================================================
// REQUEST
// ============================================================================

/// What the user selected on the control surface.
///
/// Every field is optional: an unselected folder or codec is `None`, and
/// the orchestrator turns that into the matching precondition error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub input_directory: Option<PathBuf>,
    pub codec: Option<Codec>,
    /// Only meaningful for `prores_ks`; ignored for every other codec.
    pub profile: Option<ProresProfile>,
}

impl ConversionRequest {
    pub fn new(input_directory: impl Into<PathBuf>, codec: Codec) -> Self {
        Self {
            input_directory: Some(input_directory.into()),
            codec: Some(codec),
            profile: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: ProresProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// The profile that will actually reach the encoder.
    pub fn effective_profile(&self) -> Option<ProresProfile> {
        match self.codec {
            Some(codec) if codec.supports_profile() => self.profile,
            _ => None,
        }
    }
}

// ============================================================================
// JOB
// ============================================================================

/// One file slated for conversion, with the batch's codec and profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    source_path: PathBuf,
    codec: Codec,
    profile: Option<ProresProfile>,
}

impl Job {
    /// Creates a job. A profile given for a codec without profiles is dropped.
    pub fn new(source_path: PathBuf, codec: Codec, profile: Option<ProresProfile>) -> Self {
        Self {
            source_path,
            codec,
            profile: profile.filter(|_| codec.supports_profile()),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn profile(&self) -> Option<ProresProfile> {
        self.profile
    }

    /// File name of the source, for messages.
    pub fn file_name(&self) -> String {
        file_name_of(&self.source_path)
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Result of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub job: Job,
    pub output_path: PathBuf,
    pub status: OutcomeStatus,
    /// Captured encoder error text; present only for failed jobs.
    pub diagnostic: Option<String>,
    pub elapsed: Duration,
}

impl ConversionOutcome {
    pub fn success(job: Job, output_path: PathBuf, elapsed: Duration) -> Self {
        Self {
            job,
            output_path,
            status: OutcomeStatus::Success,
            diagnostic: None,
            elapsed,
        }
    }

    pub fn failed(job: Job, output_path: PathBuf, diagnostic: String, elapsed: Duration) -> Self {
        Self {
            job,
            output_path,
            status: OutcomeStatus::Failed,
            diagnostic: Some(diagnostic),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Everything a finished run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub output_directory: PathBuf,
    pub log_path: PathBuf,
    pub total: usize,
    pub outcomes: Vec<ConversionOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_success())
    }

    /// Outcomes of the jobs that failed, in enumeration order.
    pub fn failures(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
