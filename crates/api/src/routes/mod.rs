pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// /health                                          service + store health
/// /jobs                                            list, submit
/// /jobs/{id}                                       get
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(jobs::router())
}
