//! Minimum spanning tree engines.
//!
//! Kruskal and Prim share one event vocabulary, snapshot and result type so
//! playback can show them side by side:
//! - `consider_edge`: an edge is examined (Kruskal: in weight order; Prim:
//!   every edge crossing the tree boundary, once per round).
//! - `accept_edge`: the edge joins the tree.
//! - `reject_edge` (Kruskal only): both endpoints are already connected.
//!
//! Both require an undirected graph. Unweighted edges cost 1. A disconnected
//! graph yields a spanning forest (Kruskal) or the start component's tree
//! (Prim) with `spanning == false`. Graphs whose absolute edge costs sum
//! beyond the `Weight` range are rejected before any step.

pub mod kruskal;
pub mod prim;
pub mod union_find;

use serde::Serialize;

use algoviz_core::{Edge, Graph, NodeId, Weight};

use crate::error::EngineError;
use crate::recorder::{Run, StepEvent};

pub use kruskal::kruskal;
pub use prim::prim;
pub use union_find::UnionFind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MstEvent {
    ConsiderEdge { edge: Edge },
    AcceptEdge { edge: Edge },
    RejectEdge { edge: Edge },
}

impl StepEvent for MstEvent {
    fn kind(&self) -> &'static str {
        match self {
            MstEvent::ConsiderEdge { .. } => "consider_edge",
            MstEvent::AcceptEdge { .. } => "accept_edge",
            MstEvent::RejectEdge { .. } => "reject_edge",
        }
    }
}

impl MstEvent {
    pub fn edge(&self) -> &Edge {
        match self {
            MstEvent::ConsiderEdge { edge }
            | MstEvent::AcceptEdge { edge }
            | MstEvent::RejectEdge { edge } => edge,
        }
    }

    pub fn describe(&self, graph: &Graph) -> String {
        let edge = self.edge();
        let label = format!(
            "{}-{} ({})",
            graph.name(edge.source),
            graph.name(edge.target),
            edge.cost()
        );
        match self {
            MstEvent::ConsiderEdge { .. } => format!("consider {label}"),
            MstEvent::AcceptEdge { .. } => format!("add {label} to the tree"),
            MstEvent::RejectEdge { .. } => format!("skip {label}, it would close a cycle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstSnapshot {
    /// Accepted edges so far, in acceptance order.
    pub tree: Vec<Edge>,
    pub total_weight: Weight,
    /// Current node partition: members ascending, groups ordered by their
    /// smallest member.
    pub components: Vec<Vec<NodeId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MstOutcome {
    /// Tree edges in acceptance order.
    pub edges: Vec<Edge>,
    pub total_weight: Weight,
    /// The tree touches every node of the graph.
    pub spanning: bool,
}

pub type MstRun = Run<MstOutcome, MstEvent, MstSnapshot>;

/// Tree edges are distinct graph edges, so after [`check_weights`] this sum
/// cannot overflow.
fn tree_weight(edges: &[Edge]) -> Weight {
    edges.iter().map(Edge::cost).sum()
}

/// Rejects graphs whose absolute edge costs do not sum within a [`Weight`].
fn check_weights(graph: &Graph, algorithm: &'static str) -> Result<(), EngineError> {
    match graph.total_abs_weight() {
        Some(_) => Ok(()),
        None => Err(EngineError::WeightOverflow { algorithm }),
    }
}
