//! Shared query parameter types for API handlers.

use jobq_core::pagination::{clamp_limit, clamp_offset, parse_param, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use serde::Deserialize;

/// Pagination parameters (`?limit=&offset=`).
///
/// Kept as raw strings so a malformed value falls back to its default
/// instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationParams {
    /// The effective `(limit, offset)` after parsing and clamping.
    pub fn window(&self) -> (i64, i64) {
        let limit = clamp_limit(
            parse_param(self.limit.as_deref()),
            DEFAULT_LIST_LIMIT,
            MAX_LIST_LIMIT,
        );
        let offset = clamp_offset(parse_param(self.offset.as_deref()));
        (limit, offset)
    }
}
