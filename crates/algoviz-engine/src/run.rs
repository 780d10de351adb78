//! Uniform entry point over every engine, plus the caller-owned run context.
//!
//! [`run_algorithm`] validates the input (graph vs points, labels, required
//! parameters) before any engine code runs, dispatches to the engine and
//! stores the result in a [`RunContext`]. The context replaces shared session
//! state: it owns the configuration, the last run and a playback cursor, and
//! is passed explicitly by the caller.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use algoviz_core::{Graph, NodeId, Point};

use crate::closure::{transitive_closure, ClosureRun};
use crate::config::RunConfig;
use crate::dijkstra::{dijkstra, DijkstraRun, PathOutcome};
use crate::error::EngineError;
use crate::hull::divide::DivideRun;
use crate::hull::graham::GrahamRun;
use crate::hull::{divide_and_conquer, graham_scan};
use crate::mst::{kruskal, prim, MstRun};
use crate::recorder::StepEvent;
use crate::topo::{topological_sort, TopoOutcome, TopoRun};
use crate::traversal::{bfs, dfs, TraversalRun};

// ---------------------------------------------------------------------------
// Algorithm selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Bfs,
    Dfs,
    Closure,
    Topo,
    Kruskal,
    Prim,
    Dijkstra,
    HullDc,
    Graham,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Closure,
        Algorithm::Topo,
        Algorithm::Kruskal,
        Algorithm::Prim,
        Algorithm::Dijkstra,
        Algorithm::HullDc,
        Algorithm::Graham,
    ];

    /// Stable short name, also accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Closure => "closure",
            Algorithm::Topo => "topo",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Prim => "prim",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::HullDc => "hull-dc",
            Algorithm::Graham => "graham",
        }
    }

    /// Whether the algorithm takes a point set rather than a graph.
    pub fn takes_points(self) -> bool {
        matches!(self, Algorithm::HullDc | Algorithm::Graham)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Input and request
// ---------------------------------------------------------------------------

/// What an algorithm runs on.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Graph(&'a Graph),
    Points(&'a [Point]),
}

impl<'a> Input<'a> {
    fn graph(self, algorithm: Algorithm) -> Result<&'a Graph, EngineError> {
        match self {
            Input::Graph(graph) => Ok(graph),
            Input::Points(_) => Err(EngineError::WrongInput {
                algorithm: algorithm.name(),
                expected: "graph",
            }),
        }
    }

    fn points(self, algorithm: Algorithm) -> Result<&'a [Point], EngineError> {
        match self {
            Input::Points(points) => Ok(points),
            Input::Graph(_) => Err(EngineError::WrongInput {
                algorithm: algorithm.name(),
                expected: "point set",
            }),
        }
    }
}

/// Which algorithm to run and its label parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub algorithm: Algorithm,
    /// Start node label (traversals, Prim, Dijkstra).
    pub start: Option<String>,
    /// Target node label (Dijkstra).
    pub target: Option<String>,
}

impl Request {
    pub fn new(algorithm: Algorithm) -> Self {
        Request {
            algorithm,
            start: None,
            target: None,
        }
    }

    pub fn start(mut self, label: impl Into<String>) -> Self {
        self.start = Some(label.into());
        self
    }

    pub fn target(mut self, label: impl Into<String>) -> Self {
        self.target = Some(label.into());
        self
    }
}

// ---------------------------------------------------------------------------
// AlgorithmRun
// ---------------------------------------------------------------------------

/// A finished run of any family.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AlgorithmRun {
    Traversal(TraversalRun),
    Closure(ClosureRun),
    Topo(TopoRun),
    Mst(MstRun),
    Dijkstra(DijkstraRun),
    HullDivide(DivideRun),
    Graham(GrahamRun),
}

impl AlgorithmRun {
    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        match self {
            AlgorithmRun::Traversal(run) => run.log.len(),
            AlgorithmRun::Closure(run) => run.log.len(),
            AlgorithmRun::Topo(run) => run.log.len(),
            AlgorithmRun::Mst(run) => run.log.len(),
            AlgorithmRun::Dijkstra(run) => run.log.len(),
            AlgorithmRun::HullDivide(run) => run.log.len(),
            AlgorithmRun::Graham(run) => run.log.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Event tag of step `k`.
    pub fn kind_at(&self, k: usize) -> Option<&'static str> {
        match self {
            AlgorithmRun::Traversal(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::Closure(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::Topo(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::Mst(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::Dijkstra(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::HullDivide(run) => run.log.get(k).map(|s| s.event.kind()),
            AlgorithmRun::Graham(run) => run.log.get(k).map(|s| s.event.kind()),
        }
    }

    /// Explanatory text for step `k`. Graph families name nodes by label
    /// when `input` is the graph they ran on.
    pub fn describe(&self, k: usize, input: Input<'_>) -> Option<String> {
        let fallback = Graph::directed();
        let graph = match input {
            Input::Graph(graph) => graph,
            Input::Points(_) => &fallback,
        };
        match self {
            AlgorithmRun::Traversal(run) => run.log.get(k).map(|s| s.event.describe(graph)),
            AlgorithmRun::Closure(run) => run.log.get(k).map(|s| s.event.describe(graph)),
            AlgorithmRun::Topo(run) => run.log.get(k).map(|s| s.event.describe(graph)),
            AlgorithmRun::Mst(run) => run.log.get(k).map(|s| s.event.describe(graph)),
            AlgorithmRun::Dijkstra(run) => run.log.get(k).map(|s| s.event.describe(graph)),
            AlgorithmRun::HullDivide(run) => run.log.get(k).map(|s| s.event.describe()),
            AlgorithmRun::Graham(run) => run.log.get(k).map(|s| s.event.describe()),
        }
    }

    /// One-line statement of the final answer.
    pub fn summary(&self, input: Input<'_>) -> String {
        let fallback = Graph::directed();
        let graph = match input {
            Input::Graph(graph) => graph,
            Input::Points(_) => &fallback,
        };
        match self {
            AlgorithmRun::Traversal(run) => {
                format!("visit order: {}", graph.join_names(&run.result.order, ", "))
            }
            AlgorithmRun::Closure(run) => {
                let components: Vec<String> = run
                    .result
                    .components
                    .iter()
                    .map(|c| format!("{{{}}}", graph.join_names(c, ", ")))
                    .collect();
                format!(
                    "strongly connected: {}; components: {}",
                    if run.result.strongly_connected { "yes" } else { "no" },
                    components.join(" ")
                )
            }
            AlgorithmRun::Topo(run) => match &run.result {
                TopoOutcome::Sorted { order } => {
                    format!("topological order: {}", graph.join_names(order, ", "))
                }
                TopoOutcome::Cycle {
                    processed,
                    remaining,
                } => format!(
                    "cycle detected after [{}]; unordered: {}",
                    graph.join_names(processed, ", "),
                    graph.join_names(remaining, ", ")
                ),
            },
            AlgorithmRun::Mst(run) => {
                let edges: Vec<String> = run
                    .result
                    .edges
                    .iter()
                    .map(|e| format!("{}-{}", graph.name(e.source), graph.name(e.target)))
                    .collect();
                let shape = if run.result.spanning { "tree" } else { "forest" };
                format!(
                    "{shape} edges: {}; total weight {}",
                    edges.join(", "),
                    run.result.total_weight
                )
            }
            AlgorithmRun::Dijkstra(run) => match &run.result.path {
                PathOutcome::Found { distance, path } => format!(
                    "shortest path {} with distance {}",
                    graph.join_names(path, " -> "),
                    distance
                ),
                PathOutcome::Unreachable => format!(
                    "no path from {} to {}",
                    graph.name(run.result.source),
                    graph.name(run.result.target)
                ),
            },
            AlgorithmRun::HullDivide(run) => hull_summary(&run.result.vertices),
            AlgorithmRun::Graham(run) => hull_summary(&run.result.vertices),
        }
    }
}

fn hull_summary(vertices: &[Point]) -> String {
    let listed: Vec<String> = vertices.iter().map(Point::to_string).collect();
    format!("hull ({} vertices): {}", vertices.len(), listed.join(" "))
}

// ---------------------------------------------------------------------------
// RunContext
// ---------------------------------------------------------------------------

/// Caller-owned state of an interactive session: configuration, the most
/// recent run and the step currently shown.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    config: RunConfig,
    last_algorithm: Option<Algorithm>,
    last_run: Option<AlgorithmRun>,
    cursor: usize,
}

impl RunContext {
    pub fn new(config: RunConfig) -> Self {
        RunContext {
            config,
            ..RunContext::default()
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Applies to subsequent runs only.
    pub fn set_config(&mut self, config: RunConfig) {
        self.config = config;
    }

    pub fn last_algorithm(&self) -> Option<Algorithm> {
        self.last_algorithm
    }

    pub fn last_run(&self) -> Option<&AlgorithmRun> {
        self.last_run.as_ref()
    }

    /// Index of the step currently shown.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn last_index(&self) -> usize {
        self.last_run.as_ref().map_or(0, |run| run.len().saturating_sub(1))
    }

    /// Moves the cursor to `k`, clamped to the last step. Returns the new
    /// position.
    pub fn seek(&mut self, k: usize) -> usize {
        self.cursor = k.min(self.last_index());
        self.cursor
    }

    /// Steps forward once. Returns `false` at the last step.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.last_index() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Back to the first step.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Explanatory text for the step under the cursor.
    pub fn describe_current(&self, input: Input<'_>) -> Option<String> {
        self.last_run.as_ref()?.describe(self.cursor, input)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn required_node(
    graph: &Graph,
    algorithm: Algorithm,
    parameter: &'static str,
    label: Option<&str>,
) -> Result<NodeId, EngineError> {
    let label = label.ok_or(EngineError::MissingParameter {
        algorithm: algorithm.name(),
        parameter,
    })?;
    Ok(graph.require_label(label)?)
}

fn optional_node(graph: &Graph, label: Option<&str>) -> Result<Option<NodeId>, EngineError> {
    Ok(label.map(|l| graph.require_label(l)).transpose()?)
}

fn execute(input: Input<'_>, request: &Request, config: &RunConfig) -> Result<AlgorithmRun, EngineError> {
    let algorithm = request.algorithm;
    let start = request.start.as_deref();
    let target = request.target.as_deref();

    let run = match algorithm {
        Algorithm::Bfs | Algorithm::Dfs => {
            let graph = input.graph(algorithm)?;
            let start = required_node(graph, algorithm, "start", start)?;
            let run = if algorithm == Algorithm::Bfs {
                bfs(graph, start, config)?
            } else {
                dfs(graph, start, config)?
            };
            AlgorithmRun::Traversal(run)
        }
        Algorithm::Closure => AlgorithmRun::Closure(transitive_closure(input.graph(algorithm)?, config)?),
        Algorithm::Topo => AlgorithmRun::Topo(topological_sort(input.graph(algorithm)?, config)?),
        Algorithm::Kruskal => AlgorithmRun::Mst(kruskal(input.graph(algorithm)?, config)?),
        Algorithm::Prim => {
            let graph = input.graph(algorithm)?;
            let start = optional_node(graph, start)?;
            AlgorithmRun::Mst(prim(graph, start, config)?)
        }
        Algorithm::Dijkstra => {
            let graph = input.graph(algorithm)?;
            let source = required_node(graph, algorithm, "start", start)?;
            let target = required_node(graph, algorithm, "target", target)?;
            AlgorithmRun::Dijkstra(dijkstra(graph, source, target, config)?)
        }
        Algorithm::HullDc => AlgorithmRun::HullDivide(divide_and_conquer(input.points(algorithm)?, config)?),
        Algorithm::Graham => AlgorithmRun::Graham(graham_scan(input.points(algorithm)?, config)?),
    };
    Ok(run)
}

/// Runs `request` on `input` with the context's configuration.
///
/// On success the run replaces the context's previous run and the cursor
/// returns to step 0. On error the context is left untouched.
pub fn run_algorithm<'c>(
    context: &'c mut RunContext,
    input: Input<'_>,
    request: &Request,
) -> Result<&'c AlgorithmRun, EngineError> {
    tracing::debug!(algorithm = %request.algorithm, "run requested");
    let run = execute(input, request, &context.config)?;
    tracing::debug!(algorithm = %request.algorithm, steps = run.len(), "run stored");

    context.last_algorithm = Some(request.algorithm);
    context.cursor = 0;
    Ok(context.last_run.insert(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{random_points, Demo};

    #[test]
    fn algorithm_names_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        let err = "quicksort".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.to_string(), "unknown algorithm: 'quicksort'");
    }

    #[test]
    fn bfs_through_context() {
        let graph = Demo::Traversal.graph();
        let mut context = RunContext::default();
        let run = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Bfs).start("A")).unwrap();
        assert_eq!(run.len(), 21);
        assert_eq!(run.kind_at(0), Some("enqueue"));
        assert_eq!(
            run.summary(Input::Graph(&graph)),
            "visit order: A, B, C, D, E, F, G"
        );
        assert_eq!(context.last_algorithm(), Some(Algorithm::Bfs));
        assert_eq!(context.position(), 0);
    }

    #[test]
    fn missing_start_fails_before_running() {
        let graph = Demo::Traversal.graph();
        let mut context = RunContext::default();
        let err = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Dfs)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingParameter {
                algorithm: "dfs",
                parameter: "start"
            }
        ));
        assert!(context.last_run().is_none());
    }

    #[test]
    fn unknown_label_is_reported() {
        let graph = Demo::ShortestPath.graph();
        let mut context = RunContext::default();
        let request = Request::new(Algorithm::Dijkstra).start("A").target("Z");
        let err = run_algorithm(&mut context, Input::Graph(&graph), &request).unwrap_err();
        assert_eq!(err.to_string(), "unknown node label: 'Z'");
        assert!(err.is_input_error());
    }

    #[test]
    fn wrong_input_kind() {
        let graph = Demo::Traversal.graph();
        let points = random_points(5, 10, 1);
        let mut context = RunContext::default();
        let err = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Graham)).unwrap_err();
        assert!(matches!(err, EngineError::WrongInput { expected: "point set", .. }));
        let err = run_algorithm(&mut context, Input::Points(&points), &Request::new(Algorithm::Topo)).unwrap_err();
        assert!(matches!(err, EngineError::WrongInput { expected: "graph", .. }));
    }

    #[test]
    fn failed_run_keeps_previous_one() {
        let graph = Demo::SpanningTree.graph();
        let mut context = RunContext::default();
        run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Kruskal)).unwrap();
        context.seek(3);
        assert!(run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Topo)).is_err());
        assert_eq!(context.last_algorithm(), Some(Algorithm::Kruskal));
        assert_eq!(context.position(), 3);
    }

    #[test]
    fn cursor_navigation() {
        let graph = Demo::ClosureChain.graph();
        let mut context = RunContext::default();
        run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Closure)).unwrap();
        // 7 steps: pivot, pivot, add_reach, pivot, add_reach, add_reach, pivot.
        assert_eq!(context.seek(100), 6);
        assert!(!context.advance());
        context.rewind();
        assert_eq!(context.position(), 0);
        assert!(context.advance());
        assert!(context.advance());
        assert_eq!(
            context.describe_current(Input::Graph(&graph)).as_deref(),
            Some("0 reaches 2 via 1")
        );
    }

    #[test]
    fn empty_context_cursor() {
        let mut context = RunContext::default();
        assert_eq!(context.seek(4), 0);
        assert!(!context.advance());
        assert!(context.describe_current(Input::Points(&[])).is_none());
    }

    #[test]
    fn config_is_applied() {
        let graph = Demo::Traversal.graph();
        let mut context = RunContext::new(RunConfig {
            max_steps: 5,
            ..RunConfig::default()
        });
        let err = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Bfs).start("A")).unwrap_err();
        assert!(!err.is_input_error());

        context.set_config(RunConfig::untraced());
        let run = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Bfs).start("A")).unwrap();
        assert!(run.is_empty());
    }

    #[test]
    fn summaries_for_each_family() {
        let mst = Demo::SpanningTree.graph();
        let mut context = RunContext::default();
        let run = run_algorithm(&mut context, Input::Graph(&mst), &Request::new(Algorithm::Prim).start("A")).unwrap();
        assert_eq!(
            run.summary(Input::Graph(&mst)),
            "tree edges: A-C, C-D, B-C, D-E, E-F; total weight 21"
        );

        let sp = Demo::ShortestPath.graph();
        let request = Request::new(Algorithm::Dijkstra).start("A").target("F");
        let run = run_algorithm(&mut context, Input::Graph(&sp), &request).unwrap();
        assert_eq!(
            run.summary(Input::Graph(&sp)),
            "shortest path A -> B -> D -> E -> F with distance 14"
        );

        let closure = Demo::ClosureComponents.graph();
        let run = run_algorithm(&mut context, Input::Graph(&closure), &Request::new(Algorithm::Closure)).unwrap();
        assert_eq!(
            run.summary(Input::Graph(&closure)),
            "strongly connected: no; components: {0, 1, 2} {3, 4}"
        );

        let points: Vec<Point> = [(0, 0), (4, 0), (4, 4), (0, 4), (2, 2)]
            .into_iter()
            .map(Point::from)
            .collect();
        let run = run_algorithm(&mut context, Input::Points(&points), &Request::new(Algorithm::HullDc)).unwrap();
        assert_eq!(
            run.summary(Input::Points(&points)),
            "hull (4 vertices): (0, 0) (4, 0) (4, 4) (0, 4)"
        );
    }

    #[test]
    fn serializes_with_family_tag() {
        let graph = Demo::TaskSchedule.graph();
        let mut context = RunContext::default();
        let run = run_algorithm(&mut context, Input::Graph(&graph), &Request::new(Algorithm::Topo)).unwrap();
        let json = serde_json::to_value(run).unwrap();
        assert_eq!(json["family"], "topo");
        assert_eq!(json["result"]["status"], "sorted");
        assert_eq!(json["log"][0]["event"]["kind"], "zero_indegree");
        assert_eq!(json["log"][0]["index"], 0);
    }
}
