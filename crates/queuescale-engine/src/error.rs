//! Error types for the autoscaler.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for autoscaler operations.
pub type ScaleResult<T> = Result<T, ScaleError>;

/// Errors that can occur while observing or scaling the workload.
///
/// Adapter crates map their API errors into these variants; the poll loop
/// logs them and moves on to the next cycle. None of them are fatal past
/// startup.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("queue metric unavailable: {0}")]
    MetricUnavailable(String),

    #[error("workload lookup failed: {0}")]
    LookupFailed(String),

    #[error("workload bootstrap failed: {0}")]
    BootstrapFailed(String),

    #[error("replica update failed: {0}")]
    UpdateFailed(String),

    #[error("deployment manifest error: {0}")]
    Manifest(String),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}
