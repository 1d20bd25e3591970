use std::sync::Arc;

use jobq_worker::{DispatchQueue, JobRegistry};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Sole reader/writer of job rows.
    pub registry: JobRegistry,
    /// Queue feeding the worker pool; submissions push job ids here.
    pub queue: Arc<DispatchQueue>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
