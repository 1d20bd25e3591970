//! Job entity model and DTOs.

use jobq_core::job::JobStatus;
use jobq_core::types::{JobId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Job {
    pub id: JobId,
    pub payload: String,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new job via `POST /jobs`.
#[derive(Debug, Deserialize)]
pub struct SubmitJob {
    pub payload: String,
}

/// Values for inserting a new job row. The store generates the id.
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub payload: String,
    pub status: JobStatus,
    /// Used for both `created_at` and `updated_at`.
    pub created_at: Timestamp,
}

/// Values for a status transition of an existing row.
#[derive(Debug, Clone)]
pub struct UpdateJobStatus<'a> {
    pub status: JobStatus,
    pub result: Option<&'a str>,
    pub updated_at: Timestamp,
}
