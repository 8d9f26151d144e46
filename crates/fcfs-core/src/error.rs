//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`.

use thiserror::Error;

use crate::StopIndex;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("stop {index} out of range (route has {count} stops)")]
    StopOutOfRange { index: StopIndex, count: usize },
}

/// Shorthand result type for `fcfs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
