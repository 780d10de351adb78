//! Kahn's topological sort with step recording.
//!
//! In-degrees count edges, so parallel edges are decremented once each and a
//! self-loop keeps its node out of the queue forever. The queue is FIFO and
//! seeded with the zero in-degree nodes in node order; outgoing edges are
//! processed in edge insertion order.
//!
//! A cycle is not an error: the run ends with [`TopoOutcome::Cycle`] holding
//! the nodes that could be ordered and those that could not.

use std::collections::VecDeque;

use serde::Serialize;

use algoviz_core::{Graph, NodeId};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopoEvent {
    /// `node` has no remaining predecessors and joins the queue.
    ZeroIndegree { node: NodeId },
    /// `node` leaves the queue and takes `position` in the order.
    RemoveNode { node: NodeId, position: usize },
    /// The edge `from -> node` was removed; `indegree` is what is left.
    DecrementIndegree {
        node: NodeId,
        from: NodeId,
        indegree: usize,
    },
}

impl StepEvent for TopoEvent {
    fn kind(&self) -> &'static str {
        match self {
            TopoEvent::ZeroIndegree { .. } => "zero_indegree",
            TopoEvent::RemoveNode { .. } => "remove_node",
            TopoEvent::DecrementIndegree { .. } => "decrement_indegree",
        }
    }
}

impl TopoEvent {
    pub fn describe(&self, graph: &Graph) -> String {
        match self {
            TopoEvent::ZeroIndegree { node } => {
                format!("{} has in-degree 0, enqueue it", graph.name(*node))
            }
            TopoEvent::RemoveNode { node, position } => {
                format!("output {} at position {}", graph.name(*node), position + 1)
            }
            TopoEvent::DecrementIndegree {
                node,
                from,
                indegree,
            } => format!(
                "remove edge {} -> {}, in-degree of {} is now {}",
                graph.name(*from),
                graph.name(*node),
                graph.name(*node),
                indegree
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopoSnapshot {
    /// Remaining in-degree per node, indexed by `NodeId`.
    pub indegree: Vec<usize>,
    /// Queue contents, front first.
    pub queue: Vec<NodeId>,
    /// Order produced so far.
    pub order: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TopoOutcome {
    /// Every node was ordered.
    Sorted { order: Vec<NodeId> },
    /// The graph has a cycle. `processed` is the partial order; `remaining`
    /// lists the nodes left on or behind a cycle, in node order.
    Cycle {
        processed: Vec<NodeId>,
        remaining: Vec<NodeId>,
    },
}

impl TopoOutcome {
    pub fn is_sorted(&self) -> bool {
        matches!(self, TopoOutcome::Sorted { .. })
    }

    /// The nodes that were ordered, complete or not.
    pub fn order(&self) -> &[NodeId] {
        match self {
            TopoOutcome::Sorted { order } => order,
            TopoOutcome::Cycle { processed, .. } => processed,
        }
    }
}

pub type TopoRun = Run<TopoOutcome, TopoEvent, TopoSnapshot>;

fn snapshot(indegree: &[usize], queue: &VecDeque<NodeId>, order: &[NodeId]) -> TopoSnapshot {
    TopoSnapshot {
        indegree: indegree.to_vec(),
        queue: queue.iter().copied().collect(),
        order: order.to_vec(),
    }
}

/// Orders the nodes of a directed graph so every edge points forward.
pub fn topological_sort(graph: &Graph, config: &RunConfig) -> Result<TopoRun, EngineError> {
    if !graph.is_directed() {
        return Err(EngineError::RequiresDirected { algorithm: "topo" });
    }
    tracing::debug!(nodes = graph.node_count(), "topological sort started");

    let mut recorder = StepRecorder::new(config);
    let mut indegree = vec![0usize; graph.node_count()];
    for edge in graph.edges() {
        indegree[edge.target.index()] += 1;
    }

    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut order: Vec<NodeId> = Vec::new();

    for node in graph.nodes() {
        if indegree[node.index()] == 0 {
            queue.push_back(node);
            recorder.record(TopoEvent::ZeroIndegree { node }, || {
                snapshot(&indegree, &queue, &order)
            })?;
        }
    }

    while let Some(node) = queue.pop_front() {
        order.push(node);
        recorder.record(
            TopoEvent::RemoveNode {
                node,
                position: order.len() - 1,
            },
            || snapshot(&indegree, &queue, &order),
        )?;

        for (next, _) in graph.neighbors(node) {
            let slot = &mut indegree[next.index()];
            *slot = slot.saturating_sub(1);
            let remaining = *slot;
            recorder.record(
                TopoEvent::DecrementIndegree {
                    node: next,
                    from: node,
                    indegree: remaining,
                },
                || snapshot(&indegree, &queue, &order),
            )?;
            if remaining == 0 {
                queue.push_back(next);
                recorder.record(TopoEvent::ZeroIndegree { node: next }, || {
                    snapshot(&indegree, &queue, &order)
                })?;
            }
        }
    }

    let log = recorder.finish();
    let result = if order.len() == graph.node_count() {
        TopoOutcome::Sorted { order }
    } else {
        let mut placed = vec![false; graph.node_count()];
        for node in &order {
            placed[node.index()] = true;
        }
        let remaining = graph.nodes().filter(|n| !placed[n.index()]).collect();
        TopoOutcome::Cycle {
            processed: order,
            remaining,
        }
    };
    tracing::debug!(sorted = result.is_sorted(), steps = log.len(), "topological sort finished");
    Ok(Run { result, log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Demo, GraphKind};

    fn sorted_names(graph: &Graph, outcome: &TopoOutcome) -> Vec<String> {
        match outcome {
            TopoOutcome::Sorted { order } => order.iter().map(|&n| graph.name(n)).collect(),
            other => panic!("expected a full order, got {other:?}"),
        }
    }

    #[test]
    fn task_schedule_order() {
        let graph = Demo::TaskSchedule.graph();
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        assert_eq!(
            sorted_names(&graph, &run.result),
            vec!["A", "B", "C", "D", "E", "F"]
        );
        assert_eq!(run.log.count_kind("zero_indegree"), 6);
        assert_eq!(run.log.count_kind("remove_node"), 6);
        assert_eq!(run.log.count_kind("decrement_indegree"), graph.edge_count());
    }

    #[test]
    fn course_plan_order() {
        let graph = Demo::CoursePlan.graph();
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        assert_eq!(
            sorted_names(&graph, &run.result),
            vec![
                "Math",
                "Physics",
                "Chemistry",
                "Electronics",
                "Biology",
                "Computing",
                "Biochemistry",
                "AI"
            ]
        );
    }

    #[test]
    fn numbered_dag_order() {
        let graph = Demo::NumberedDag.graph();
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        assert_eq!(
            sorted_names(&graph, &run.result),
            vec!["1", "2", "3", "4", "5", "6"]
        );
    }

    #[test]
    fn initial_snapshot_holds_indegrees() {
        let graph = Demo::TaskSchedule.graph();
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        let first = run.log[0].snapshot.as_ref().unwrap();
        // Node order: A, C, B, D, E, F.
        assert_eq!(first.indegree, vec![0, 2, 0, 1, 2, 1]);
        assert_eq!(first.queue, vec![NodeId(0)]);
        assert!(first.order.is_empty());
    }

    #[test]
    fn cycle_reports_processed_and_remaining() {
        let graph = Graph::from_edges(
            GraphKind::Directed,
            &[("a", "b"), ("b", "c"), ("c", "b"), ("c", "d")],
        );
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        match run.result {
            TopoOutcome::Cycle {
                processed,
                remaining,
            } => {
                assert_eq!(processed, vec![NodeId(0)]);
                assert_eq!(remaining, vec![NodeId(1), NodeId(2), NodeId(3)]);
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = Graph::from_edges(GraphKind::Directed, &[("a", "a")]);
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        assert!(!run.result.is_sorted());
        assert!(run.log.is_empty());
    }

    #[test]
    fn parallel_edges_count_twice() {
        let graph = Graph::from_edges(GraphKind::Directed, &[("a", "b"), ("a", "b")]);
        let run = topological_sort(&graph, &RunConfig::default()).unwrap();
        assert!(run.result.is_sorted());
        assert_eq!(run.log.count_kind("decrement_indegree"), 2);
    }

    #[test]
    fn undirected_input_is_rejected() {
        let graph = Demo::Traversal.graph();
        let err = topological_sort(&graph, &RunConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::RequiresDirected { algorithm: "topo" }));
    }

    #[test]
    fn empty_graph_is_sorted() {
        let run = topological_sort(&Graph::directed(), &RunConfig::default()).unwrap();
        assert_eq!(run.result, TopoOutcome::Sorted { order: vec![] });
    }
}
