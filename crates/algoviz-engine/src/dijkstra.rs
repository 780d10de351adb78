//! Dijkstra's single-source shortest paths with step recording.
//!
//! The priority queue is a binary min-heap keyed by `(distance, node)` with
//! lazy deletion: an improved distance pushes a new entry and the outdated
//! one is discarded when popped (`pop_min` with `stale: true`). Neighbors
//! that are already finalized are not relaxed.
//!
//! Negative edge weights are rejected before any step is recorded. An
//! unreachable target is an ordinary outcome, not an error.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use algoviz_core::{EdgeId, Graph, NodeId, Weight};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DijkstraEvent {
    /// The cheapest queue entry was removed. `stale` entries belong to a node
    /// that is already finalized.
    PopMin {
        node: NodeId,
        distance: Weight,
        stale: bool,
    },
    /// `node`'s distance is final.
    Finalize { node: NodeId, distance: Weight },
    /// The edge `from -> to` was tried. `old` is `None` while `to` is still
    /// at infinity.
    Relax {
        from: NodeId,
        to: NodeId,
        edge: EdgeId,
        old: Option<Weight>,
        candidate: Weight,
        improved: bool,
    },
}

impl StepEvent for DijkstraEvent {
    fn kind(&self) -> &'static str {
        match self {
            DijkstraEvent::PopMin { .. } => "pop_min",
            DijkstraEvent::Finalize { .. } => "finalize",
            DijkstraEvent::Relax { .. } => "relax",
        }
    }
}

fn show(distance: Option<Weight>) -> String {
    distance.map_or_else(|| "inf".to_string(), |d| d.to_string())
}

impl DijkstraEvent {
    pub fn describe(&self, graph: &Graph) -> String {
        match self {
            DijkstraEvent::PopMin {
                node,
                distance,
                stale: false,
            } => format!("pop {} at distance {}", graph.name(*node), distance),
            DijkstraEvent::PopMin {
                node,
                distance,
                stale: true,
            } => format!(
                "pop {} at distance {}, already final, skip",
                graph.name(*node),
                distance
            ),
            DijkstraEvent::Finalize { node, distance } => {
                format!("shortest distance to {} is {}", graph.name(*node), distance)
            }
            DijkstraEvent::Relax {
                from,
                to,
                old,
                candidate,
                improved,
                ..
            } => {
                let verdict = if *improved { "update" } else { "keep" };
                format!(
                    "relax {} -> {}: {} vs {}, {}",
                    graph.name(*from),
                    graph.name(*to),
                    candidate,
                    show(*old),
                    verdict
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DijkstraSnapshot {
    /// Tentative distance per node, `None` for infinity.
    pub distances: Vec<Option<Weight>>,
    /// Finalized nodes in finalization order.
    pub finalized: Vec<NodeId>,
    /// Queue entries in pop order, stale ones included.
    pub queue: Vec<(Weight, NodeId)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found { distance: Weight, path: Vec<NodeId> },
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DijkstraOutcome {
    pub source: NodeId,
    pub target: NodeId,
    /// Final distance per node, `None` when unreachable.
    pub distances: Vec<Option<Weight>>,
    /// Predecessor on a shortest path, per node.
    pub previous: Vec<Option<NodeId>>,
    pub path: PathOutcome,
}

pub type DijkstraRun = Run<DijkstraOutcome, DijkstraEvent, DijkstraSnapshot>;

type Queue = BinaryHeap<Reverse<(Weight, NodeId)>>;

fn snapshot(distances: &[Option<Weight>], finalized: &[NodeId], queue: &Queue) -> DijkstraSnapshot {
    let mut entries: Vec<(Weight, NodeId)> = queue.iter().map(|Reverse(entry)| *entry).collect();
    entries.sort();
    DijkstraSnapshot {
        distances: distances.to_vec(),
        finalized: finalized.to_vec(),
        queue: entries,
    }
}

/// Shortest paths from `source`, with the path to `target` extracted.
pub fn dijkstra(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    config: &RunConfig,
) -> Result<DijkstraRun, EngineError> {
    for node in [source, target] {
        if !graph.contains(node) {
            return Err(EngineError::UnknownNode { node });
        }
    }
    if let Some(edge) = graph.edges().find(|e| e.cost() < 0) {
        return Err(EngineError::NegativeWeight {
            edge: edge.id,
            weight: edge.cost(),
        });
    }
    // Bounds every tentative distance, which sums distinct edges
    if graph.total_abs_weight().is_none() {
        return Err(EngineError::WeightOverflow {
            algorithm: "dijkstra",
        });
    }
    tracing::debug!(
        source = %graph.name(source),
        target = %graph.name(target),
        "dijkstra started"
    );

    let n = graph.node_count();
    let mut recorder = StepRecorder::new(config);
    let mut distances: Vec<Option<Weight>> = vec![None; n];
    let mut previous: Vec<Option<NodeId>> = vec![None; n];
    let mut done = vec![false; n];
    let mut finalized: Vec<NodeId> = Vec::new();
    let mut queue: Queue = BinaryHeap::new();

    distances[source.index()] = Some(0);
    queue.push(Reverse((0, source)));

    while let Some(Reverse((distance, node))) = queue.pop() {
        let stale = done[node.index()];
        recorder.record(
            DijkstraEvent::PopMin {
                node,
                distance,
                stale,
            },
            || snapshot(&distances, &finalized, &queue),
        )?;
        if stale {
            continue;
        }

        done[node.index()] = true;
        finalized.push(node);
        recorder.record(DijkstraEvent::Finalize { node, distance }, || {
            snapshot(&distances, &finalized, &queue)
        })?;

        for (next, edge) in graph.neighbors(node) {
            if done[next.index()] {
                continue;
            }
            let old = distances[next.index()];
            let candidate = distance + edge.cost();
            let improved = old.map_or(true, |d| candidate < d);
            if improved {
                distances[next.index()] = Some(candidate);
                previous[next.index()] = Some(node);
                queue.push(Reverse((candidate, next)));
            }
            recorder.record(
                DijkstraEvent::Relax {
                    from: node,
                    to: next,
                    edge: edge.id,
                    old,
                    candidate,
                    improved,
                },
                || snapshot(&distances, &finalized, &queue),
            )?;
        }
    }

    let path = match distances[target.index()] {
        Some(distance) => PathOutcome::Found {
            distance,
            path: trace_path(&previous, source, target),
        },
        None => PathOutcome::Unreachable,
    };
    let reachable = matches!(path, PathOutcome::Found { .. });
    let log = recorder.finish();
    tracing::debug!(reachable, steps = log.len(), "dijkstra finished");
    Ok(Run {
        result: DijkstraOutcome {
            source,
            target,
            distances,
            previous,
            path,
        },
        log,
    })
}

/// Walks predecessors back from `target`. The predecessor chain is acyclic,
/// so the walk is bounded by the node count.
fn trace_path(previous: &[Option<NodeId>], source: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;
    while current != source && path.len() <= previous.len() {
        match previous[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Demo, GraphKind};
    use petgraph::graph::NodeIndex;
    use petgraph::visit::EdgeRef;

    fn node(graph: &Graph, label: &str) -> NodeId {
        graph.node_by_label(label).unwrap()
    }

    #[test]
    fn shortest_path_demo() {
        let graph = Demo::ShortestPath.graph();
        let run = dijkstra(&graph, node(&graph, "A"), node(&graph, "F"), &RunConfig::default()).unwrap();
        match &run.result.path {
            PathOutcome::Found { distance, path } => {
                assert_eq!(*distance, 14);
                assert_eq!(graph.join_names(path, " -> "), "A -> B -> D -> E -> F");
            }
            PathOutcome::Unreachable => panic!("F should be reachable"),
        }
        // Node order A, B, C, D, E, F.
        assert_eq!(
            run.result.distances,
            vec![Some(0), Some(4), Some(2), Some(9), Some(11), Some(14)]
        );
    }

    #[test]
    fn demo_step_counts() {
        let graph = Demo::ShortestPath.graph();
        let run = dijkstra(&graph, node(&graph, "A"), node(&graph, "F"), &RunConfig::default()).unwrap();
        assert_eq!(run.log.count_kind("pop_min"), 9);
        assert_eq!(run.log.count_kind("finalize"), 6);
        assert_eq!(run.log.count_kind("relax"), 8);
        let stale = run
            .log
            .events()
            .filter(|e| matches!(e, DijkstraEvent::PopMin { stale: true, .. }))
            .count();
        assert_eq!(stale, 3);
    }

    #[test]
    fn relax_snapshot_shows_update() {
        let graph = Demo::ShortestPath.graph();
        let run = dijkstra(&graph, node(&graph, "A"), node(&graph, "F"), &RunConfig::default()).unwrap();
        // pop A, finalize A, relax A -> B.
        let step = &run.log[2];
        assert_eq!(
            step.event,
            DijkstraEvent::Relax {
                from: NodeId(0),
                to: NodeId(1),
                edge: EdgeId(0),
                old: None,
                candidate: 4,
                improved: true
            }
        );
        let snap = step.snapshot.as_ref().unwrap();
        assert_eq!(snap.distances[1], Some(4));
        assert_eq!(snap.finalized, vec![NodeId(0)]);
        assert_eq!(snap.queue, vec![(4, NodeId(1))]);
        assert_eq!(step.event.describe(&graph), "relax A -> B: 4 vs inf, update");
    }

    #[test]
    fn unreachable_target() {
        let graph = Graph::from_weighted_edges(GraphKind::Directed, &[("a", "b", 1), ("c", "a", 1)]);
        let run = dijkstra(&graph, node(&graph, "a"), node(&graph, "c"), &RunConfig::default()).unwrap();
        assert_eq!(run.result.path, PathOutcome::Unreachable);
        assert_eq!(run.result.distances[2], None);
    }

    #[test]
    fn source_equals_target() {
        let graph = Demo::ShortestPath.graph();
        let a = node(&graph, "A");
        let run = dijkstra(&graph, a, a, &RunConfig::default()).unwrap();
        assert_eq!(
            run.result.path,
            PathOutcome::Found {
                distance: 0,
                path: vec![a]
            }
        );
    }

    #[test]
    fn negative_weight_is_malformed_input() {
        let graph = Graph::from_weighted_edges(GraphKind::Directed, &[("a", "b", 1), ("b", "c", -2)]);
        let err = dijkstra(&graph, node(&graph, "a"), node(&graph, "c"), &RunConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NegativeWeight {
                edge: EdgeId(1),
                weight: -2
            }
        ));
        assert!(err.is_input_error());
    }

    #[test]
    fn undirected_edges_work_both_ways() {
        let graph = Graph::from_weighted_edges(GraphKind::Undirected, &[("a", "b", 3), ("c", "b", 4)]);
        let run = dijkstra(&graph, node(&graph, "c"), node(&graph, "a"), &RunConfig::default()).unwrap();
        assert!(matches!(run.result.path, PathOutcome::Found { distance: 7, .. }));
    }

    #[test]
    fn agrees_with_petgraph() {
        let graph = Demo::ShortestPath.graph();
        let a = node(&graph, "A");
        let run = dijkstra(&graph, a, a, &RunConfig::untraced()).unwrap();
        let oracle = petgraph::algo::dijkstra(graph.petgraph(), a.into(), None, |e| {
            e.weight().weight.unwrap_or(1)
        });
        for n in graph.nodes() {
            let idx: NodeIndex<u32> = n.into();
            assert_eq!(run.result.distances[n.index()], oracle.get(&idx).copied());
        }
    }

    #[test]
    fn overflowing_path_length_is_rejected() {
        let heavy = i64::MAX / 2 + 1;
        let graph = Graph::from_weighted_edges(GraphKind::Directed, &[("a", "b", heavy), ("b", "c", heavy)]);
        let err = dijkstra(&graph, node(&graph, "a"), node(&graph, "c"), &RunConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::WeightOverflow { algorithm: "dijkstra" }));
        assert!(err.is_input_error());
    }
}
