//! Core error types for algoviz-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of building graphs and point sets.

use crate::id::NodeId;
use thiserror::Error;

/// Errors produced while constructing or querying the graph model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A node id does not belong to the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// No node carries the given label.
    #[error("unknown node label: '{label}'")]
    UnknownLabel { label: String },

    /// An adjacency matrix was not square or contained values other than 0/1.
    #[error("invalid adjacency matrix: {reason}")]
    InvalidMatrix { reason: String },

    /// A point lies outside the range the exact geometric predicates support.
    #[error("point ({x}, {y}) is outside the supported coordinate range")]
    CoordinateOutOfRange { x: i64, y: i64 },
}
