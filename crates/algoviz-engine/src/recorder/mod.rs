//! Step recording for algorithm runs.
//!
//! Every engine owns one [`StepRecorder`] for the duration of a run and calls
//! [`StepRecorder::record`] at each semantically meaningful point (node
//! dequeued, edge accepted, distance relaxed, hulls merged). The recorder
//! appends a [`Step`] holding the typed event and a snapshot of the engine
//! state, and [`StepRecorder::finish`] freezes the result into a [`StepLog`].
//!
//! # Copy-on-record
//!
//! Engines mutate their queue, visited set or distance table in place as they
//! progress. A step that referenced those structures would show the final
//! state at playback time. The snapshot closure is therefore invoked
//! immediately and must return an owned value: the snapshot type parameter is
//! bounded by `'static`, so a borrow of live engine state cannot be stored.

pub mod error;
pub mod log;

use std::convert::Infallible;

use serde::Serialize;

use crate::config::RunConfig;

pub use error::RecorderError;
pub use log::{Step, StepLog};

/// A closed, per-algorithm-family set of step events.
pub trait StepEvent {
    /// Snake-case tag of the event, e.g. `"relax"`.
    fn kind(&self) -> &'static str;
}

/// The outcome of one engine invocation: its final answer and its history.
#[derive(Debug, Clone, Serialize)]
pub struct Run<R, E, S> {
    pub result: R,
    pub log: StepLog<E, S>,
}

/// Append-only recorder for a single run.
#[derive(Debug)]
pub struct StepRecorder<E, S: 'static> {
    /// Recorded steps (None when tracing is disabled).
    steps: Option<Vec<Step<E, S>>>,
    snapshots: bool,
    limit: usize,
}

impl<E: StepEvent, S: 'static> StepRecorder<E, S> {
    /// Creates an empty recorder configured by `config`.
    pub fn new(config: &RunConfig) -> Self {
        StepRecorder {
            steps: config.trace_enabled.then(Vec::new),
            snapshots: config.snapshots_enabled,
            limit: config.max_steps,
        }
    }

    /// Whether steps are being kept.
    pub fn is_enabled(&self) -> bool {
        self.steps.is_some()
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a step. `snapshot` runs now (if snapshots are enabled) and its
    /// owned return value is stored with the event.
    pub fn record<F>(&mut self, event: E, snapshot: F) -> Result<(), RecorderError>
    where
        F: FnOnce() -> S,
    {
        self.try_record(event, || Ok::<S, Infallible>(snapshot()))
    }

    /// Like [`record`](Self::record) for snapshot captures that can fail. A
    /// failure aborts the recording with [`RecorderError::Snapshot`]; the
    /// step is not appended.
    pub fn try_record<F, X>(&mut self, event: E, snapshot: F) -> Result<(), RecorderError>
    where
        F: FnOnce() -> Result<S, X>,
        X: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let Some(steps) = self.steps.as_mut() else {
            return Ok(());
        };
        if steps.len() >= self.limit {
            tracing::warn!(limit = self.limit, kind = event.kind(), "step limit reached");
            return Err(RecorderError::StepLimitExceeded { limit: self.limit });
        }

        let index = steps.len();
        let snapshot = if self.snapshots {
            let captured = snapshot().map_err(|e| RecorderError::Snapshot {
                index,
                source: e.into(),
            })?;
            Some(captured)
        } else {
            None
        };

        tracing::trace!(index, kind = event.kind(), "step recorded");
        steps.push(Step {
            index,
            event,
            snapshot,
        });
        Ok(())
    }

    /// Freezes the recorded steps into a read-only log.
    pub fn finish(self) -> StepLog<E, S> {
        StepLog::new(self.steps.unwrap_or_default())
    }
}
