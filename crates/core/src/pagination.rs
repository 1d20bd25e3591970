//! Pagination constants and clamping for job listing.

/// Page size used when the caller does not supply a usable `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Largest page a single listing request may return.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit.
///
/// Missing or non-positive values fall back to `default`; values above
/// `max` are capped.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(max),
        _ => default,
    }
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Parse a raw query-string integer, treating anything unparseable as absent.
pub fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}
