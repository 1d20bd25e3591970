use async_trait::async_trait;
use jobq_core::types::JobId;

use super::JobStore;
use crate::models::job::{CreateJob, Job, UpdateJobStatus};
use crate::repositories::JobRepo;
use crate::{DbPool, StoreError};

/// [`JobStore`] backed by the `jobs` table.
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert(&self, input: &CreateJob) -> Result<Job, StoreError> {
        Ok(JobRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_status(
        &self,
        id: JobId,
        update: &UpdateJobStatus<'_>,
    ) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::update_status(&self.pool, id, update).await?)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Job>, StoreError> {
        Ok(JobRepo::list(&self.pool, limit, offset).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(JobRepo::count(&self.pool).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
