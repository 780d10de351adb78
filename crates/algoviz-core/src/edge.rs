//! Edge payloads and the read-only edge view handed to algorithm engines.

use serde::{Deserialize, Serialize};

use crate::id::{EdgeId, NodeId};

/// Edge weight. Unweighted edges count as weight 1 for weighted algorithms.
pub type Weight = i64;

/// Whether edges have a direction. Fixed for the lifetime of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Directed)
    }
}

/// Data stored on each petgraph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// `None` for unweighted edges.
    pub weight: Option<Weight>,
}

/// A resolved edge: id, endpoints as inserted, and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Option<Weight>,
}

impl Edge {
    /// Weight used by weighted algorithms (1 when the edge is unweighted).
    pub fn cost(&self) -> Weight {
        self.weight.unwrap_or(1)
    }

    /// The endpoint opposite `node`. For a self-loop this is `node` itself.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(weight: Option<Weight>) -> Edge {
        Edge {
            id: EdgeId(0),
            source: NodeId(1),
            target: NodeId(2),
            weight,
        }
    }

    #[test]
    fn unweighted_edge_costs_one() {
        assert_eq!(edge(None).cost(), 1);
        assert_eq!(edge(Some(7)).cost(), 7);
    }

    #[test]
    fn other_endpoint() {
        let e = edge(None);
        assert_eq!(e.other(NodeId(1)), NodeId(2));
        assert_eq!(e.other(NodeId(2)), NodeId(1));
    }

    #[test]
    fn graph_kind_direction() {
        assert!(GraphKind::Directed.is_directed());
        assert!(!GraphKind::Undirected.is_directed());
    }
}
