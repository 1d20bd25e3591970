//! Route definitions for the `/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Job routes.
///
/// ```text
/// GET    /jobs          -> list_jobs
/// POST   /jobs          -> submit_job
/// GET    /jobs/{id}     -> get_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::submit_job))
        .route("/jobs/{id}", get(jobs::get_job))
}
