//! Job lifecycle: the status state machine and submission validation.
//!
//! ```text
//! pending ──► processing ──► done
//!                  │
//!                  └───────► failed
//! ```
//!
//! `done` and `failed` are terminal. Statuses are stored as their lowercase
//! names (see [`JobStatus::as_str`]) so the database and the JSON wire form
//! agree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Persisted and waiting in the dispatch queue.
    Pending,
    /// Claimed by a worker; execution in progress.
    Processing,
    /// Finished successfully with a non-empty result.
    Done,
    /// Execution failed; the result may be empty.
    Failed,
}

impl JobStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Done,
        JobStatus::Failed,
    ];

    /// The stored / serialized name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether no further transition may leave this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown job status: \"{s}\"")))
    }
}

impl TryFrom<String> for JobStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Result string recorded when the built-in processor finishes a job.
pub const RESULT_PROCESSED: &str = "Job processed successfully";

/// Validate a submitted payload.
///
/// The payload is opaque, but it must contain at least one non-whitespace
/// character.
pub fn validate_payload(payload: &str) -> Result<(), CoreError> {
    if payload.trim().is_empty() {
        return Err(CoreError::Validation(
            "Payload must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
