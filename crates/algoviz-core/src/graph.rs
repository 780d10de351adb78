//! Graph: the immutable input model for every graph algorithm engine.
//!
//! [`Graph`] wraps a petgraph `Graph` whose node weights are the node labels
//! and whose edge weights are [`EdgeData`]. The directed flag is fixed per
//! graph by its [`GraphKind`]; undirected graphs are stored as single
//! directed petgraph edges and exposed from both endpoints.
//!
//! # Deterministic ordering
//!
//! Demos must replay identically, so every enumeration is defined by
//! insertion order:
//! - [`Graph::nodes`] yields nodes in the order they were added.
//! - [`Graph::edges`] yields edges in the order they were added.
//! - [`Graph::neighbors`] yields the edges incident to a node (outgoing only
//!   for directed graphs) in edge insertion order.
//!
//! Nodes and edges are never removed, so [`NodeId`] and [`EdgeId`] stay dense
//! and can index engine-local tables directly.

use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::edge::{Edge, EdgeData, GraphKind, Weight};
use crate::error::CoreError;
use crate::id::{EdgeId, NodeId};

/// A small labelled graph, constructed once per run and only read by engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Storage. Node weight = label.
    inner: petgraph::Graph<String, EdgeData, Directed, u32>,
    /// Direction semantics of every edge.
    kind: GraphKind,
    /// Label -> id lookup, in insertion order.
    labels: IndexMap<String, NodeId>,
}

impl Graph {
    /// Creates an empty graph of the given kind.
    pub fn new(kind: GraphKind) -> Self {
        Graph {
            inner: petgraph::Graph::default(),
            kind,
            labels: IndexMap::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Graph::new(GraphKind::Directed)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Graph::new(GraphKind::Undirected)
    }

    /// Builds an unweighted graph from labelled edge pairs. Nodes are created
    /// on first mention, so node order follows first appearance.
    pub fn from_edges(kind: GraphKind, edges: &[(&str, &str)]) -> Self {
        let mut graph = Graph::new(kind);
        for (a, b) in edges {
            graph.add_edge_by_label(a, b, None);
        }
        graph
    }

    /// Builds a weighted graph from labelled `(source, target, weight)` triples.
    pub fn from_weighted_edges(kind: GraphKind, edges: &[(&str, &str, Weight)]) -> Self {
        let mut graph = Graph::new(kind);
        for (a, b, w) in edges {
            graph.add_edge_by_label(a, b, Some(*w));
        }
        graph
    }

    /// Builds a directed graph from a 0/1 adjacency matrix. Node `i` is
    /// labelled `"i"`; row `i`, column `j` set to 1 adds the edge `i -> j`.
    pub fn from_adjacency_matrix(rows: &[Vec<u8>]) -> Result<Self, CoreError> {
        let n = rows.len();
        let mut graph = Graph::directed();
        for i in 0..n {
            graph.add_node(i.to_string());
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(CoreError::InvalidMatrix {
                    reason: format!("row {i} has {} columns, expected {n}", row.len()),
                });
            }
            for (j, &cell) in row.iter().enumerate() {
                match cell {
                    0 => {}
                    1 => {
                        graph.add_edge(NodeId(i as u32), NodeId(j as u32), None)?;
                    }
                    other => {
                        return Err(CoreError::InvalidMatrix {
                            reason: format!("cell ({i}, {j}) is {other}, expected 0 or 1"),
                        });
                    }
                }
            }
        }
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Mutation (construction only)
    // -----------------------------------------------------------------------

    /// Adds a node with the given label, or returns the existing node's id if
    /// the label is already present.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.labels.get(&label) {
            return id;
        }
        let id = NodeId::from(self.inner.add_node(label.clone()));
        self.labels.insert(label, id);
        id
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Both endpoints must exist. Returns the new [`EdgeId`].
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: Option<Weight>,
    ) -> Result<EdgeId, CoreError> {
        if !self.contains(source) {
            return Err(CoreError::NodeNotFound { id: source });
        }
        if !self.contains(target) {
            return Err(CoreError::NodeNotFound { id: target });
        }
        let idx = self
            .inner
            .add_edge(source.into(), target.into(), EdgeData { weight });
        Ok(EdgeId::from(idx))
    }

    /// Adds an edge between two labels, creating missing nodes.
    pub fn add_edge_by_label(&mut self, source: &str, target: &str, weight: Option<Weight>) -> EdgeId {
        let s = self.add_node(source);
        let t = self.add_node(target);
        EdgeId::from(self.inner.add_edge(s.into(), t.into(), EdgeData { weight }))
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Direction semantics of this graph.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Returns `true` for directed graphs.
    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    /// Read-only access to the underlying petgraph storage.
    pub fn petgraph(&self) -> &petgraph::Graph<String, EdgeData, Directed, u32> {
        &self.inner
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Returns `true` if `id` names a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.node_weight(id.into()).is_some()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices().map(NodeId::from)
    }

    /// The label of a node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.inner.node_weight(id.into()).map(String::as_str)
    }

    /// The label of a node, or `#<id>` when the id is foreign to this graph.
    pub fn name(&self, id: NodeId) -> String {
        match self.label(id) {
            Some(label) => label.to_string(),
            None => format!("#{id}"),
        }
    }

    /// Joins node labels with `separator`, e.g. for visit orders and paths.
    pub fn join_names(&self, nodes: &[NodeId], separator: &str) -> String {
        nodes
            .iter()
            .map(|&n| self.name(n))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Looks up a node by label.
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// Looks up a node by label, failing with [`CoreError::UnknownLabel`].
    pub fn require_label(&self, label: &str) -> Result<NodeId, CoreError> {
        self.node_by_label(label).ok_or_else(|| CoreError::UnknownLabel {
            label: label.to_string(),
        })
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        let idx: EdgeIndex<u32> = id.into();
        let (source, target) = self.inner.edge_endpoints(idx)?;
        let data = self.inner.edge_weight(idx)?;
        Some(Edge {
            id,
            source: source.into(),
            target: target.into(),
            weight: data.weight,
        })
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner.edge_references().map(|e| Edge {
            id: e.id().into(),
            source: e.source().into(),
            target: e.target().into(),
            weight: e.weight().weight,
        })
    }

    /// Sum of absolute edge costs, or `None` when it does not fit in a
    /// [`Weight`]. Every sum over distinct edges is bounded by it, so engines
    /// that check it up front can add edge costs without overflow.
    pub fn total_abs_weight(&self) -> Option<Weight> {
        self.edges()
            .try_fold(0, |acc: Weight, edge| acc.checked_add(edge.cost().checked_abs()?))
    }

    /// Edges incident to `node` paired with the opposite endpoint, in edge
    /// insertion order. Directed graphs report outgoing edges only.
    ///
    /// Returns an empty list for a node that is not in the graph.
    pub fn neighbors(&self, node: NodeId) -> Vec<(NodeId, Edge)> {
        let idx: NodeIndex<u32> = node.into();
        if self.inner.node_weight(idx).is_none() {
            return Vec::new();
        }

        let mut incident: Vec<EdgeIndex<u32>> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.id())
            .collect();
        if !self.is_directed() {
            incident.extend(self.inner.edges_directed(idx, Direction::Incoming).map(|e| e.id()));
        }
        // petgraph walks adjacency lists newest-first; restore insertion order.
        incident.sort();
        incident.dedup();

        incident
            .into_iter()
            .filter_map(|e| self.edge(e.into()))
            .map(|edge| (edge.other(node), edge))
            .collect()
    }

    /// Dense reachability-style adjacency matrix: `m[i][j]` is true when an
    /// edge leads from node `i` to node `j` (both ways for undirected graphs).
    pub fn adjacency_matrix(&self) -> Vec<Vec<bool>> {
        let n = self.node_count();
        let mut matrix = vec![vec![false; n]; n];
        for edge in self.edges() {
            matrix[edge.source.index()][edge.target.index()] = true;
            if !self.is_directed() {
                matrix[edge.target.index()][edge.source.index()] = true;
            }
        }
        matrix
    }
}
