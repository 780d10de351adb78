//! Prim's algorithm.
//!
//! Each round scans the included nodes in inclusion order and their incident
//! edges in insertion order, recording a `consider_edge` step for every edge
//! that leaves the tree. The cheapest of them (first seen on ties) is
//! accepted. The run stops when no edge crosses the boundary, so only the
//! start node's component is spanned.

use algoviz_core::{Edge, Graph, NodeId};

use super::{check_weights, tree_weight, MstEvent, MstOutcome, MstRun, MstSnapshot};
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepRecorder};

/// Included nodes as one group, every other node a singleton.
fn partition(graph: &Graph, included: &[NodeId], in_tree: &[bool]) -> Vec<Vec<NodeId>> {
    let mut tree_group = included.to_vec();
    tree_group.sort();
    let mut groups: Vec<Vec<NodeId>> = graph
        .nodes()
        .filter(|n| !in_tree[n.index()])
        .map(|n| vec![n])
        .collect();
    if !tree_group.is_empty() {
        groups.push(tree_group);
    }
    groups.sort();
    groups
}

fn snapshot(graph: &Graph, tree: &[Edge], included: &[NodeId], in_tree: &[bool]) -> MstSnapshot {
    MstSnapshot {
        tree: tree.to_vec(),
        total_weight: tree_weight(tree),
        components: partition(graph, included, in_tree),
    }
}

/// Grows a tree from `start`, or from the first node when `start` is `None`.
pub fn prim(graph: &Graph, start: Option<NodeId>, config: &RunConfig) -> Result<MstRun, EngineError> {
    if graph.is_directed() {
        return Err(EngineError::RequiresUndirected { algorithm: "prim" });
    }
    check_weights(graph, "prim")?;
    if let Some(node) = start {
        if !graph.contains(node) {
            return Err(EngineError::UnknownNode { node });
        }
    }
    let mut recorder = StepRecorder::new(config);
    let Some(root) = start.or_else(|| graph.nodes().next()) else {
        return Ok(Run {
            result: MstOutcome {
                edges: Vec::new(),
                total_weight: 0,
                spanning: true,
            },
            log: recorder.finish(),
        });
    };
    tracing::debug!(start = %graph.name(root), nodes = graph.node_count(), "prim started");

    let mut in_tree = vec![false; graph.node_count()];
    let mut included: Vec<NodeId> = vec![root];
    in_tree[root.index()] = true;
    let mut tree: Vec<Edge> = Vec::new();

    loop {
        let mut best: Option<(Edge, NodeId)> = None;
        for &node in &included {
            for (next, edge) in graph.neighbors(node) {
                if in_tree[next.index()] {
                    continue;
                }
                recorder.record(MstEvent::ConsiderEdge { edge }, || {
                    snapshot(graph, &tree, &included, &in_tree)
                })?;
                if best.map_or(true, |(b, _)| edge.cost() < b.cost()) {
                    best = Some((edge, next));
                }
            }
        }
        let Some((edge, next)) = best else { break };

        in_tree[next.index()] = true;
        included.push(next);
        tree.push(edge);
        recorder.record(MstEvent::AcceptEdge { edge }, || {
            snapshot(graph, &tree, &included, &in_tree)
        })?;
    }

    let total_weight = tree_weight(&tree);
    let spanning = included.len() == graph.node_count();
    let log = recorder.finish();
    tracing::debug!(total_weight, spanning, steps = log.len(), "prim finished");
    Ok(Run {
        result: MstOutcome {
            edges: tree,
            total_weight,
            spanning,
        },
        log,
    })
}
