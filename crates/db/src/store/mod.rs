//! The [`JobStore`] seam between the engine and durable storage.
//!
//! The engine holds an `Arc<dyn JobStore>` injected at construction, so the
//! same registry runs against PostgreSQL in production and against
//! [`MemoryJobStore`] in tests.

use async_trait::async_trait;
use jobq_core::types::JobId;

use crate::models::job::{CreateJob, Job, UpdateJobStatus};
use crate::StoreError;

mod memory;
mod postgres;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

/// Durable record of jobs keyed by id.
///
/// Implementations must be safe to share across worker tasks.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new row and return it with its generated id.
    async fn insert(&self, input: &CreateJob) -> Result<Job, StoreError>;

    /// Point lookup. `Ok(None)` when no row matches.
    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError>;

    /// Overwrite status/result/updated_at. `Ok(None)` when no row matches.
    async fn update_status(
        &self,
        id: JobId,
        update: &UpdateJobStatus<'_>,
    ) -> Result<Option<Job>, StoreError>;

    /// Rows ordered by `created_at` descending, then id descending.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Job>, StoreError>;

    /// Total number of rows.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Cheap liveness probe.
    async fn health_check(&self) -> Result<(), StoreError>;
}
