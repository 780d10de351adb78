//! End-to-end scenarios on the built-in demo instances.
//!
//! Each test goes through `run_algorithm` exactly as the command-line front
//! end does: resolve labels, run, then read the result and replay the log.
//!
//! Tests cover:
//! - BFS/DFS visit order on the traversal demo
//! - Kruskal and Prim on the spanning-tree demo (total 21)
//! - Dijkstra on the shortest-path demo
//! - Topological sort of the three DAG demos and a cyclic graph
//! - Transitive closure of the two matrix demos
//! - Hull engines on a fixed and a seeded random point set
//! - Playback through the run context

use algoviz_core::{random_points, Demo, Graph, GraphKind, Point};
use algoviz_engine::dijkstra::PathOutcome;
use algoviz_engine::topo::TopoOutcome;
use algoviz_engine::{run_algorithm, Algorithm, AlgorithmRun, Input, Request, RunConfig, RunContext};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run_on(graph: &Graph, request: Request) -> AlgorithmRun {
    let mut context = RunContext::default();
    run_algorithm(&mut context, Input::Graph(graph), &request)
        .unwrap()
        .clone()
}

fn run_points(points: &[Point], algorithm: Algorithm) -> AlgorithmRun {
    let mut context = RunContext::default();
    run_algorithm(&mut context, Input::Points(points), &Request::new(algorithm))
        .unwrap()
        .clone()
}

fn hull_of(run: &AlgorithmRun) -> Vec<Point> {
    match run {
        AlgorithmRun::HullDivide(run) => run.result.vertices.clone(),
        AlgorithmRun::Graham(run) => run.result.vertices.clone(),
        other => panic!("not a hull run: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

#[test]
fn bfs_from_a_visits_level_order() {
    let graph = Demo::Traversal.graph();
    let run = run_on(&graph, Request::new(Algorithm::Bfs).start("A"));
    let AlgorithmRun::Traversal(traversal) = &run else {
        panic!("expected a traversal run");
    };
    assert_eq!(
        graph.join_names(&traversal.result.order, " "),
        "A B C D E F G"
    );
    assert!(!run.is_empty());
}

#[test]
fn dfs_from_a_goes_deep_first() {
    let graph = Demo::Traversal.graph();
    let run = run_on(&graph, Request::new(Algorithm::Dfs).start("A"));
    assert_eq!(
        run.summary(Input::Graph(&graph)),
        "visit order: A, B, D, E, F, C, G"
    );
}

// ---------------------------------------------------------------------------
// Spanning trees
// ---------------------------------------------------------------------------

#[test]
fn kruskal_total_weight_is_21() {
    let graph = Demo::SpanningTree.graph();
    let run = run_on(&graph, Request::new(Algorithm::Kruskal));
    let AlgorithmRun::Mst(mst) = &run else {
        panic!("expected an MST run");
    };
    assert_eq!(mst.result.total_weight, 21);
    assert_eq!(mst.result.edges.len(), graph.node_count() - 1);
    assert!(mst.result.spanning);
    assert_eq!(
        run.summary(Input::Graph(&graph)),
        "tree edges: C-D, B-C, A-C, D-E, E-F; total weight 21"
    );
}

#[test]
fn prim_matches_kruskal_weight() {
    let graph = Demo::SpanningTree.graph();
    let kruskal = run_on(&graph, Request::new(Algorithm::Kruskal));
    let prim = run_on(&graph, Request::new(Algorithm::Prim));
    match (&kruskal, &prim) {
        (AlgorithmRun::Mst(k), AlgorithmRun::Mst(p)) => {
            assert_eq!(k.result.total_weight, p.result.total_weight);
        }
        _ => panic!("expected two MST runs"),
    }
}

// ---------------------------------------------------------------------------
// Shortest path
// ---------------------------------------------------------------------------

#[test]
fn dijkstra_a_to_f() {
    let graph = Demo::ShortestPath.graph();
    let run = run_on(&graph, Request::new(Algorithm::Dijkstra).start("A").target("F"));
    let AlgorithmRun::Dijkstra(sp) = &run else {
        panic!("expected a Dijkstra run");
    };
    match &sp.result.path {
        PathOutcome::Found { distance, path } => {
            assert_eq!(*distance, 14);
            assert_eq!(graph.join_names(path, ""), "ABDEF");
        }
        PathOutcome::Unreachable => panic!("F is reachable from A"),
    }
}

#[test]
fn dijkstra_reports_unreachable_target() {
    let graph = Demo::ShortestPath.graph();
    let run = run_on(&graph, Request::new(Algorithm::Dijkstra).start("F").target("A"));
    assert_eq!(run.summary(Input::Graph(&graph)), "no path from F to A");
}

// ---------------------------------------------------------------------------
// Topological sort
// ---------------------------------------------------------------------------

#[test]
fn topological_demos_respect_every_edge() {
    for demo in [Demo::CoursePlan, Demo::TaskSchedule, Demo::NumberedDag] {
        let graph = demo.graph();
        let run = run_on(&graph, Request::new(Algorithm::Topo));
        let AlgorithmRun::Topo(topo) = &run else {
            panic!("expected a topological sort run");
        };
        let TopoOutcome::Sorted { order } = &topo.result else {
            panic!("{demo} is acyclic");
        };
        let mut position = vec![0; graph.node_count()];
        for (i, node) in order.iter().enumerate() {
            position[node.index()] = i;
        }
        for edge in graph.edges() {
            assert!(position[edge.source.index()] < position[edge.target.index()], "{demo}");
        }
    }
}

#[test]
fn cyclic_graph_yields_cycle_variant() {
    let graph = Graph::from_edges(
        GraphKind::Directed,
        &[("wake", "coffee"), ("coffee", "work"), ("work", "coffee")],
    );
    let run = run_on(&graph, Request::new(Algorithm::Topo));
    let AlgorithmRun::Topo(topo) = &run else {
        panic!("expected a topological sort run");
    };
    match &topo.result {
        TopoOutcome::Cycle {
            processed,
            remaining,
        } => {
            assert!(processed.len() < graph.node_count());
            assert_eq!(graph.join_names(remaining, ","), "coffee,work");
        }
        TopoOutcome::Sorted { .. } => panic!("graph has a cycle"),
    }
}

// ---------------------------------------------------------------------------
// Closure
// ---------------------------------------------------------------------------

#[test]
fn closure_demos() {
    let chain = Demo::ClosureChain.graph();
    let run = run_on(&chain, Request::new(Algorithm::Closure));
    let AlgorithmRun::Closure(closure) = &run else {
        panic!("expected a closure run");
    };
    assert!(closure.result.reach[0][3]);
    assert!(!closure.result.strongly_connected);

    let components = Demo::ClosureComponents.graph();
    let run = run_on(&components, Request::new(Algorithm::Closure));
    assert_eq!(
        run.summary(Input::Graph(&components)),
        "strongly connected: no; components: {0, 1, 2} {3, 4}"
    );
}

// ---------------------------------------------------------------------------
// Hulls
// ---------------------------------------------------------------------------

#[test]
fn hull_engines_agree_on_fixed_points() {
    let points: Vec<Point> = [(3, 1), (0, 0), (6, 2), (5, 6), (1, 5), (3, 3), (2, 4), (6, 4)]
        .into_iter()
        .map(Point::from)
        .collect();
    let dc = hull_of(&run_points(&points, Algorithm::HullDc));
    let graham = hull_of(&run_points(&points, Algorithm::Graham));
    assert_eq!(dc, graham);
    // (3, 1) lies on the bottom edge and is not a vertex
    let expected: Vec<Point> = [(0, 0), (6, 2), (6, 4), (5, 6), (1, 5)]
        .into_iter()
        .map(Point::from)
        .collect();
    assert_eq!(dc, expected);
}

#[test]
fn hull_engines_agree_on_seeded_points() {
    let points = random_points(40, 100, 7);
    let dc = run_points(&points, Algorithm::HullDc);
    let graham = run_points(&points, Algorithm::Graham);
    assert_eq!(hull_of(&dc), hull_of(&graham));
    assert!(!dc.is_empty());
    assert!(!graham.is_empty());
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[test]
fn replay_through_context() {
    let graph = Demo::ShortestPath.graph();
    let mut context = RunContext::new(RunConfig::default());
    let request = Request::new(Algorithm::Dijkstra).start("A").target("F");
    let len = run_algorithm(&mut context, Input::Graph(&graph), &request)
        .unwrap()
        .len();

    let mut texts = vec![context.describe_current(Input::Graph(&graph)).unwrap()];
    while context.advance() {
        texts.push(context.describe_current(Input::Graph(&graph)).unwrap());
    }
    assert_eq!(texts.len(), len);
    assert_eq!(texts[0], "pop A at distance 0");
    assert_eq!(texts[1], "shortest distance to A is 0");

    context.seek(2);
    assert_eq!(
        context.describe_current(Input::Graph(&graph)).as_deref(),
        Some("relax A -> B: 4 vs inf, update")
    );
}

#[test]
fn json_export_of_a_hull_run() {
    let points = random_points(12, 20, 3);
    let run = run_points(&points, Algorithm::Graham);
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["family"], "graham");
    assert_eq!(json["log"][0]["event"]["kind"], "find_start");
    assert!(json["log"][2]["snapshot"]["stack"].is_array());
}
