//! Core error type.
//!
//! `lift-sim` wraps `CoreError` as one variant of its own `SimError` so that
//! validation failures raised here surface unchanged at the submission
//! boundary.

use thiserror::Error;

use crate::Floor;

/// Caller-contract violations detected while building core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("request source and destination are both floor {0}")]
    SameFloor(Floor),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lift-core`.
pub type CoreResult<T> = Result<T, CoreError>;
