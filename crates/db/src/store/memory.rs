use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use jobq_core::types::JobId;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::JobStore;
use crate::models::job::{CreateJob, Job, UpdateJobStatus};
use crate::StoreError;

/// In-process [`JobStore`] with the same semantics as the PostgreSQL one.
///
/// Cloning shares the underlying map. Contents are lost with the process.
#[derive(Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, input: &CreateJob) -> Result<Job, StoreError> {
        let job = Job {
            id: Uuid::new_v4(),
            payload: input.payload.clone(),
            status: input.status,
            result: None,
            created_at: input.created_at,
            updated_at: input.created_at,
        };
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: JobId,
        update: &UpdateJobStatus<'_>,
    ) -> Result<Option<Job>, StoreError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&id) else {
            return Ok(None);
        };
        job.status = update.status;
        job.result = update.result.map(str::to_owned);
        job.updated_at = update.updated_at;
        Ok(Some(job.clone()))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        let mut rows: Vec<&Job> = jobs.values().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.jobs.read().await.len() as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jobq_core::job::JobStatus;

    use super::*;

    fn new_job(payload: &str, created_at: jobq_core::types::Timestamp) -> CreateJob {
        CreateJob {
            payload: payload.to_string(),
            status: JobStatus::Pending,
            created_at,
        }
    }

    #[tokio::test]
    async fn insert_generates_id_and_sets_both_timestamps() {
        let store = MemoryJobStore::new();
        let now = Utc::now();

        let job = store.insert(&new_job("a", now)).await.unwrap();

        assert_eq!(job.payload, "a");
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.result, None);
        assert_eq!(job.created_at, now);
        assert_eq!(job.updated_at, now);
        assert_eq!(store.find_by_id(job.id).await.unwrap(), Some(job));
    }

    #[tokio::test]
    async fn update_of_missing_row_returns_none() {
        let store = MemoryJobStore::new();
        let update = UpdateJobStatus {
            status: JobStatus::Done,
            result: Some("x"),
            updated_at: Utc::now(),
        };
        assert_eq!(store.update_status(Uuid::new_v4(), &update).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_windowed() {
        let store = MemoryJobStore::new();
        let base = Utc::now();
        for (i, payload) in ["first", "second", "third"].into_iter().enumerate() {
            store
                .insert(&new_job(payload, base + Duration::seconds(i as i64)))
                .await
                .unwrap();
        }

        let page: Vec<String> = store
            .list(2, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.payload)
            .collect();
        assert_eq!(page, ["third", "second"]);

        let tail = store.list(2, 2).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].payload, "first");

        assert!(store.list(10, 3).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 3);
    }
}
