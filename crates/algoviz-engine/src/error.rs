//! Engine error types.
//!
//! Only malformed input and recorder misuse are errors. Algorithm-intrinsic
//! non-results (a cycle for topological sort, an unreachable target for
//! Dijkstra, a disconnected graph for MST) are ordinary result variants.

use algoviz_core::{CoreError, EdgeId, NodeId, Weight};
use thiserror::Error;

use crate::recorder::RecorderError;

/// Errors produced by engines and by [`run_algorithm`](crate::run::run_algorithm).
///
/// Input errors are raised before the first step is recorded.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown algorithm: '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("node {node} is not part of the graph")]
    UnknownNode { node: NodeId },

    #[error("{algorithm} requires a '{parameter}' parameter")]
    MissingParameter {
        algorithm: &'static str,
        parameter: &'static str,
    },

    #[error("{algorithm} expects {expected} input")]
    WrongInput {
        algorithm: &'static str,
        expected: &'static str,
    },

    #[error("{algorithm} requires a directed graph")]
    RequiresDirected { algorithm: &'static str },

    #[error("{algorithm} requires an undirected graph")]
    RequiresUndirected { algorithm: &'static str },

    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: EdgeId, weight: Weight },

    #[error("{algorithm}: edge weights sum beyond the representable range")]
    WeightOverflow { algorithm: &'static str },

    #[error(transparent)]
    Recorder(#[from] RecorderError),
}

impl EngineError {
    /// Whether this error stems from malformed input rather than from the
    /// recorder.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, EngineError::Recorder(_))
    }
}
