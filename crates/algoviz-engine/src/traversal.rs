//! Breadth-first and depth-first traversal with step recording.
//!
//! Both strategies share one frontier loop: BFS takes from the front of the
//! frontier, DFS from the back.
//!
//! - BFS marks a node as discovered when it is enqueued, so every node enters
//!   the queue at most once.
//! - DFS pushes unvisited neighbors in reverse adjacency order so the first
//!   neighbor is explored first. A node can sit on the stack more than once;
//!   popping an already visited node records a `dequeue` step and nothing
//!   else.
//!
//! Only the start node's component is reached. Unreached nodes never appear
//! in the result.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use algoviz_core::{Graph, NodeId};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

/// Which end of the frontier is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Queue (FIFO).
    Breadth,
    /// Stack (LIFO).
    Depth,
}

/// Step events emitted by BFS and DFS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraversalEvent {
    /// A node entered the frontier. `parent` is `None` for the start node.
    Enqueue {
        node: NodeId,
        parent: Option<NodeId>,
    },
    /// A node left the frontier; `frontier` is what remains, front first.
    Dequeue { node: NodeId, frontier: Vec<NodeId> },
    /// A node was visited for the first time; `position` is its rank in the
    /// visit order.
    Visit { node: NodeId, position: usize },
}

impl StepEvent for TraversalEvent {
    fn kind(&self) -> &'static str {
        match self {
            TraversalEvent::Enqueue { .. } => "enqueue",
            TraversalEvent::Dequeue { .. } => "dequeue",
            TraversalEvent::Visit { .. } => "visit",
        }
    }
}

impl TraversalEvent {
    /// One line of explanatory text for this step.
    pub fn describe(&self, graph: &Graph) -> String {
        match self {
            TraversalEvent::Enqueue { node, parent: None } => {
                format!("start at {}", graph.name(*node))
            }
            TraversalEvent::Enqueue {
                node,
                parent: Some(parent),
            } => format!(
                "discover {} from {}",
                graph.name(*node),
                graph.name(*parent)
            ),
            TraversalEvent::Dequeue { node, frontier } => format!(
                "take {} from the frontier, remaining [{}]",
                graph.name(*node),
                graph.join_names(frontier, ", ")
            ),
            TraversalEvent::Visit { node, position } => {
                format!("visit {} (#{})", graph.name(*node), position + 1)
            }
        }
    }
}

/// Engine state captured with every traversal step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalSnapshot {
    /// Visit order so far.
    pub visited: Vec<NodeId>,
    /// Frontier contents, front (BFS) or bottom (DFS) first.
    pub frontier: Vec<NodeId>,
}

/// Final answer of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalOutcome {
    pub strategy: Strategy,
    /// Nodes in the order they were visited.
    pub order: Vec<NodeId>,
}

pub type TraversalRun = Run<TraversalOutcome, TraversalEvent, TraversalSnapshot>;

/// Breadth-first search from `start`.
pub fn bfs(graph: &Graph, start: NodeId, config: &RunConfig) -> Result<TraversalRun, EngineError> {
    traverse(graph, start, Strategy::Breadth, config)
}

/// Depth-first search from `start`.
pub fn dfs(graph: &Graph, start: NodeId, config: &RunConfig) -> Result<TraversalRun, EngineError> {
    traverse(graph, start, Strategy::Depth, config)
}

fn snapshot(order: &[NodeId], frontier: &VecDeque<NodeId>) -> TraversalSnapshot {
    TraversalSnapshot {
        visited: order.to_vec(),
        frontier: frontier.iter().copied().collect(),
    }
}

/// Runs the traversal selected by `strategy`.
pub fn traverse(
    graph: &Graph,
    start: NodeId,
    strategy: Strategy,
    config: &RunConfig,
) -> Result<TraversalRun, EngineError> {
    if !graph.contains(start) {
        return Err(EngineError::UnknownNode { node: start });
    }
    tracing::debug!(?strategy, start = %graph.name(start), "traversal started");

    let mut recorder = StepRecorder::new(config);
    let node_count = graph.node_count();
    let mut discovered = vec![false; node_count];
    let mut visited = vec![false; node_count];
    let mut order: Vec<NodeId> = Vec::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();

    frontier.push_back(start);
    discovered[start.index()] = true;
    recorder.record(
        TraversalEvent::Enqueue {
            node: start,
            parent: None,
        },
        || snapshot(&order, &frontier),
    )?;

    loop {
        let next = match strategy {
            Strategy::Breadth => frontier.pop_front(),
            Strategy::Depth => frontier.pop_back(),
        };
        let Some(node) = next else { break };

        recorder.record(
            TraversalEvent::Dequeue {
                node,
                frontier: frontier.iter().copied().collect(),
            },
            || snapshot(&order, &frontier),
        )?;
        if visited[node.index()] {
            continue;
        }

        visited[node.index()] = true;
        order.push(node);
        recorder.record(
            TraversalEvent::Visit {
                node,
                position: order.len() - 1,
            },
            || snapshot(&order, &frontier),
        )?;

        let neighbors = graph.neighbors(node);
        match strategy {
            Strategy::Breadth => {
                for (next, _) in neighbors {
                    if discovered[next.index()] {
                        continue;
                    }
                    discovered[next.index()] = true;
                    frontier.push_back(next);
                    recorder.record(
                        TraversalEvent::Enqueue {
                            node: next,
                            parent: Some(node),
                        },
                        || snapshot(&order, &frontier),
                    )?;
                }
            }
            Strategy::Depth => {
                for (next, _) in neighbors.into_iter().rev() {
                    if visited[next.index()] {
                        continue;
                    }
                    frontier.push_back(next);
                    recorder.record(
                        TraversalEvent::Enqueue {
                            node: next,
                            parent: Some(node),
                        },
                        || snapshot(&order, &frontier),
                    )?;
                }
            }
        }
    }

    let log = recorder.finish();
    tracing::debug!(?strategy, visited = order.len(), steps = log.len(), "traversal finished");
    Ok(Run {
        result: TraversalOutcome { strategy, order },
        log,
    })
}
