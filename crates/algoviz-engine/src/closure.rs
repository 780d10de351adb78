//! Transitive closure (Warshall) and connectivity analysis.
//!
//! The reachability matrix starts as the adjacency matrix (symmetric for
//! undirected graphs). For each intermediate vertex `k` in node order a
//! `pivot` step is recorded, then every pair `(i, j)` that becomes reachable
//! through `k` gets an `add_reach` step. The diagonal is not seeded: a node
//! reaches itself only through a cycle.
//!
//! Strongly connected components come from `petgraph::algo::tarjan_scc` and
//! are normalized: nodes ascending within a component, components ordered by
//! their smallest node.

use petgraph::algo::tarjan_scc;
use petgraph::Undirected;
use serde::Serialize;

use algoviz_core::{Graph, NodeId};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

/// Step events of the closure computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosureEvent {
    /// Paths through `via` are considered from now on.
    Pivot { via: NodeId },
    /// `from` newly reaches `to` through `via`.
    AddReach {
        from: NodeId,
        to: NodeId,
        via: NodeId,
    },
}

impl StepEvent for ClosureEvent {
    fn kind(&self) -> &'static str {
        match self {
            ClosureEvent::Pivot { .. } => "pivot",
            ClosureEvent::AddReach { .. } => "add_reach",
        }
    }
}

impl ClosureEvent {
    pub fn describe(&self, graph: &Graph) -> String {
        match self {
            ClosureEvent::Pivot { via } => {
                format!("allow paths through {}", graph.name(*via))
            }
            ClosureEvent::AddReach { from, to, via } => format!(
                "{} reaches {} via {}",
                graph.name(*from),
                graph.name(*to),
                graph.name(*via)
            ),
        }
    }
}

/// Copy of the reachability matrix at the time of the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosureSnapshot {
    pub reach: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosureOutcome {
    /// `reach[i][j]` is true when a path of length >= 1 leads from `i` to `j`.
    pub reach: Vec<Vec<bool>>,
    /// Every ordered pair of distinct nodes is reachable. Vacuously true for
    /// graphs with fewer than two nodes.
    pub strongly_connected: bool,
    pub components: Vec<Vec<NodeId>>,
}

impl ClosureOutcome {
    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        self.reach
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .unwrap_or(false)
    }
}

pub type ClosureRun = Run<ClosureOutcome, ClosureEvent, ClosureSnapshot>;

/// Computes the transitive closure of `graph` and its strongly connected
/// components.
pub fn transitive_closure(graph: &Graph, config: &RunConfig) -> Result<ClosureRun, EngineError> {
    let n = graph.node_count();
    tracing::debug!(nodes = n, "closure started");

    let mut recorder = StepRecorder::new(config);
    let mut reach = graph.adjacency_matrix();

    for k in 0..n {
        let via = NodeId(k as u32);
        recorder.record(ClosureEvent::Pivot { via }, || ClosureSnapshot {
            reach: reach.clone(),
        })?;
        for i in 0..n {
            if !reach[i][k] {
                continue;
            }
            for j in 0..n {
                if reach[i][j] || !reach[k][j] {
                    continue;
                }
                reach[i][j] = true;
                recorder.record(
                    ClosureEvent::AddReach {
                        from: NodeId(i as u32),
                        to: NodeId(j as u32),
                        via,
                    },
                    || ClosureSnapshot {
                        reach: reach.clone(),
                    },
                )?;
            }
        }
    }

    let strongly_connected = (0..n).all(|i| (0..n).all(|j| i == j || reach[i][j]));
    let components = components(graph);

    let log = recorder.finish();
    tracing::debug!(
        strongly_connected,
        components = components.len(),
        steps = log.len(),
        "closure finished"
    );
    Ok(Run {
        result: ClosureOutcome {
            reach,
            strongly_connected,
            components,
        },
        log,
    })
}

/// Boolean `k`-th power of the adjacency matrix: `m[i][j]` is true when a
/// walk of exactly `k` edges leads from `i` to `j`. `k = 0` gives the
/// identity. Records no steps.
pub fn path_matrix(graph: &Graph, k: usize) -> Vec<Vec<bool>> {
    let n = graph.node_count();
    let mut result: Vec<Vec<bool>> = (0..n).map(|i| (0..n).map(|j| i == j).collect()).collect();
    let mut base = graph.adjacency_matrix();
    let mut k = k;
    while k > 0 {
        if k & 1 == 1 {
            result = boolean_product(&result, &base);
        }
        k >>= 1;
        if k > 0 {
            base = boolean_product(&base, &base);
        }
    }
    result
}

fn boolean_product(a: &[Vec<bool>], b: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let n = a.len();
    (0..n)
        .map(|i| (0..n).map(|j| (0..n).any(|m| a[i][m] && b[m][j])).collect())
        .collect()
}

fn components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let raw = if graph.is_directed() {
        tarjan_scc(graph.petgraph())
    } else {
        let undirected = graph.petgraph().clone().into_edge_type::<Undirected>();
        tarjan_scc(&undirected)
    };
    let mut components: Vec<Vec<NodeId>> = raw
        .into_iter()
        .map(|component| {
            let mut nodes: Vec<NodeId> = component.into_iter().map(NodeId::from).collect();
            nodes.sort();
            nodes
        })
        .collect();
    components.sort();
    components
}
