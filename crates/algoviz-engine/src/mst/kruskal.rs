//! Kruskal's algorithm.
//!
//! Edges are stable-sorted by cost, so equal weights keep insertion order.
//! Every edge is considered, including those examined after the tree is
//! complete.

use algoviz_core::{Edge, Graph};

use super::{check_weights, tree_weight, MstEvent, MstOutcome, MstRun, MstSnapshot, UnionFind};
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepRecorder};

fn snapshot(tree: &[Edge], sets: &UnionFind) -> MstSnapshot {
    MstSnapshot {
        tree: tree.to_vec(),
        total_weight: tree_weight(tree),
        components: sets.groups(),
    }
}

pub fn kruskal(graph: &Graph, config: &RunConfig) -> Result<MstRun, EngineError> {
    if graph.is_directed() {
        return Err(EngineError::RequiresUndirected {
            algorithm: "kruskal",
        });
    }
    check_weights(graph, "kruskal")?;
    tracing::debug!(nodes = graph.node_count(), edges = graph.edge_count(), "kruskal started");

    let mut recorder = StepRecorder::new(config);
    let mut edges: Vec<Edge> = graph.edges().collect();
    edges.sort_by_key(Edge::cost);

    let mut sets = UnionFind::new(graph.node_count());
    let mut tree: Vec<Edge> = Vec::new();

    for edge in edges {
        recorder.record(MstEvent::ConsiderEdge { edge }, || snapshot(&tree, &sets))?;
        if sets.union(edge.source.index(), edge.target.index()) {
            tree.push(edge);
            recorder.record(MstEvent::AcceptEdge { edge }, || snapshot(&tree, &sets))?;
        } else {
            recorder.record(MstEvent::RejectEdge { edge }, || snapshot(&tree, &sets))?;
        }
    }

    let total_weight = tree_weight(&tree);
    let spanning = tree.len() + 1 >= graph.node_count();
    let log = recorder.finish();
    tracing::debug!(total_weight, spanning, steps = log.len(), "kruskal finished");
    Ok(Run {
        result: MstOutcome {
            edges: tree,
            total_weight,
            spanning,
        },
        log,
    })
}
