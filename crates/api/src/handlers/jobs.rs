//! Handlers for the `/jobs` resource.
//!
//! Submission persists the job through the registry and then hands its id
//! to the dispatch queue. When the queue is full the request waits for a
//! free slot; that wait is the service's backpressure. A request that gives
//! up while waiting does not lose its job: the id is queued once a slot
//! frees up.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jobq_core::error::CoreError;
use jobq_core::types::JobId;
use jobq_db::models::job::SubmitJob;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Stable message for malformed submission bodies.
const INVALID_PAYLOAD: &str = "Invalid payload";

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /jobs
///
/// Submit a new job. Returns 201 with the created job in `pending` status.
/// Malformed JSON, a missing or non-string `payload`, and an empty payload
/// are all rejected with 400.
pub async fn submit_job(
    State(state): State<AppState>,
    input: Result<Json<SubmitJob>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected job submission body");
        AppError::BadRequest(INVALID_PAYLOAD.into())
    })?;

    let job = state.registry.create(&input.payload).await?;

    // The enqueue runs in its own task: if the request is dropped (timeout,
    // client gone) while waiting for a queue slot, the id still gets queued.
    let queue = Arc::clone(&state.queue);
    let job_id = job.id;
    match tokio::spawn(async move { queue.enqueue(job_id).await }).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!(job_id = %job.id, error = %e, "Failed to enqueue job; job left pending");
            return Err(e.into());
        }
        Err(e) => {
            tracing::error!(job_id = %job.id, error = %e, "Enqueue task failed; job left pending");
            return Err(AppError::InternalError(e.to_string()));
        }
    }

    tracing::info!(job_id = %job.id, "Job submitted");
    Ok((StatusCode::CREATED, Json(job)))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /jobs
///
/// List jobs newest first. Supports optional `limit` (default 10, max 100)
/// and `offset` query parameters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.window();
    let jobs = state.registry.list(limit, offset).await?;
    Ok(Json(jobs))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /jobs/{id}
///
/// Get a single job. Ids that are not UUIDs cannot exist, so they are
/// reported as not found.
pub async fn get_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: JobId = raw_id.parse().map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: raw_id.clone(),
        })
    })?;

    let job = state.registry.get(id).await.map_err(|e| {
        tracing::warn!(job_id = %id, error = %e, "Job lookup failed");
        e
    })?;
    Ok(Json(job))
}
