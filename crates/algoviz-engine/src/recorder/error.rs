//! Recorder misuse errors.
//!
//! These propagate straight to the caller: a run whose log would have a gap
//! is aborted rather than returned with a desynchronized step index.

use thiserror::Error;

/// Errors raised while appending to a step log.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("step limit ({limit}) exceeded")]
    StepLimitExceeded { limit: usize },

    #[error("snapshot capture failed at step {index}: {source}")]
    Snapshot {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
