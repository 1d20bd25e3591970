//! Domain types shared by every jobq crate.
//!
//! This crate has no internal dependencies: it holds the identifier and
//! timestamp aliases, the job status state machine, input validation, and
//! the domain error type.

pub mod error;
pub mod job;
pub mod pagination;
pub mod types;
