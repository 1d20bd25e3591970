//! Repository for the `jobs` table.
//!
//! Status values are bound as their lowercase names via
//! [`JobStatus::as_str`]; the table's check constraint rejects anything else.

use jobq_core::types::JobId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, UpdateJobStatus};

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, payload, status, result, created_at, updated_at";

/// Provides CRUD operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job. The id is generated by the database.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (payload, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.payload)
            .bind(input.status.as_str())
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: JobId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite status, result and `updated_at` of a job.
    ///
    /// Not guarded by the previous status. Returns `None` when no row has
    /// the given id.
    pub async fn update_status(
        pool: &PgPool,
        id: JobId,
        update: &UpdateJobStatus<'_>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status = $2, result = $3, updated_at = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(update.status.as_str())
            .bind(update.result)
            .bind(update.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// List jobs newest first. `limit` and `offset` are expected to be
    /// clamped by the caller.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all job rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
