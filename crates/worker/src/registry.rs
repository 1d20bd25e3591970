//! The job registry: sole writer of job state.
//!
//! Wraps an injected [`JobStore`] and gives its operations lifecycle
//! meaning. Status updates are unconditional (no compare-and-swap on the
//! previous status); that is safe because [`DispatchQueue`](crate::DispatchQueue)
//! hands each id to exactly one worker, so no two writers race on one job.

use std::sync::Arc;

use chrono::Utc;
use jobq_core::error::CoreError;
use jobq_core::job::{validate_payload, JobStatus};
use jobq_core::types::JobId;
use jobq_db::models::job::{CreateJob, Job, UpdateJobStatus};
use jobq_db::{JobStore, StoreError};

/// Entity name used in `NotFound` errors.
const ENTITY: &str = "Job";

/// Errors returned by [`JobRegistry`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Validation failure or missing job.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    fn not_found(id: JobId) -> Self {
        RegistryError::Core(CoreError::NotFound {
            entity: ENTITY,
            id: id.to_string(),
        })
    }
}

/// Translates store operations into job lifecycle operations.
#[derive(Clone)]
pub struct JobRegistry {
    store: Arc<dyn JobStore>,
}

impl JobRegistry {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Persist a new `pending` job.
    ///
    /// Rejects an empty payload before touching the store.
    pub async fn create(&self, payload: &str) -> Result<Job, RegistryError> {
        validate_payload(payload)?;

        let input = CreateJob {
            payload: payload.to_string(),
            status: JobStatus::Pending,
            created_at: Utc::now(),
        };
        let job = self.store.insert(&input).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert job");
            e
        })?;

        tracing::info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    /// Fetch a job by id.
    pub async fn get(&self, id: JobId) -> Result<Job, RegistryError> {
        match self.store.find_by_id(id).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(RegistryError::not_found(id)),
            Err(e) => {
                tracing::error!(job_id = %id, error = %e, "Failed to retrieve job");
                Err(e.into())
            }
        }
    }

    /// List jobs newest first. An empty window is not an error.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Job>, RegistryError> {
        self.store.list(limit, offset).await.map_err(|e| {
            tracing::error!(limit, offset, error = %e, "Failed to list jobs");
            e.into()
        })
    }

    /// Set status, result and `updated_at` of a job, returning the new row.
    ///
    /// A missing row is reported as `NotFound`, not as a store error, so
    /// callers can tell a vanished job apart from an unreachable store.
    pub async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        result: Option<&str>,
    ) -> Result<Job, RegistryError> {
        let update = UpdateJobStatus {
            status,
            result,
            updated_at: Utc::now(),
        };
        let job = self
            .store
            .update_status(id, &update)
            .await?
            .ok_or_else(|| RegistryError::not_found(id))?;

        tracing::debug!(job_id = %id, status = %status, "Job status updated");
        Ok(job)
    }

    /// `pending -> processing`.
    pub async fn mark_processing(&self, id: JobId) -> Result<Job, RegistryError> {
        self.update_status(id, JobStatus::Processing, None).await
    }

    /// `processing -> done` with the job's result.
    pub async fn complete(&self, id: JobId, result: &str) -> Result<Job, RegistryError> {
        self.update_status(id, JobStatus::Done, Some(result)).await
    }

    /// `processing -> failed`. No result is recorded.
    pub async fn fail(&self, id: JobId) -> Result<Job, RegistryError> {
        self.update_status(id, JobStatus::Failed, None).await
    }

    /// Probe the underlying store.
    pub async fn health_check(&self) -> Result<(), RegistryError> {
        Ok(self.store.health_check().await?)
    }
}
