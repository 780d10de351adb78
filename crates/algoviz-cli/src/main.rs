//! Algorithm visualizer CLI.
//!
//! Provides the `algoviz` binary: `demos` lists the built-in instances and
//! `run` executes one engine on a demo graph or a seeded random point set,
//! then prints the step log as text or JSON.
//!
//! Uses the same `run_algorithm` dispatch and `RunContext` a presentation
//! layer would, so the printed steps are exactly what playback would show.

use std::process;

use clap::{Parser, Subcommand};

use algoviz_core::{random_points, Demo, Graph};
use algoviz_engine::{run_algorithm, Algorithm, Input, Request, RunConfig, RunContext};

/// Step-recorded graph and geometry algorithms.
#[derive(Parser)]
#[command(name = "algoviz", about = "Step-recorded graph and geometry algorithms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the built-in demo graphs.
    Demos,

    /// Run an algorithm and print its steps.
    Run {
        /// Algorithm: bfs, dfs, closure, topo, kruskal, prim, dijkstra,
        /// hull-dc, graham.
        algorithm: String,

        /// Demo graph to run on (default: the algorithm's usual demo).
        #[arg(short, long)]
        demo: Option<String>,

        /// Start node label (BFS, DFS, Prim, Dijkstra).
        #[arg(short, long)]
        start: Option<String>,

        /// Target node label (Dijkstra).
        #[arg(short, long)]
        target: Option<String>,

        /// Number of random points for the hull algorithms.
        #[arg(long, default_value_t = 16)]
        points: usize,

        /// Seed for the random point set.
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Largest coordinate of a random point.
        #[arg(long, default_value_t = 100)]
        max_coord: i64,

        /// Print the full run (result and step log) as JSON.
        #[arg(long)]
        json: bool,

        /// Stop with an error after this many steps.
        #[arg(long)]
        max_steps: Option<usize>,

        /// Record events without state snapshots.
        #[arg(long)]
        no_snapshots: bool,
    },
}

/// Options for the run subcommand.
struct RunArgs {
    algorithm: String,
    demo: Option<String>,
    start: Option<String>,
    target: Option<String>,
    points: usize,
    seed: u64,
    max_coord: i64,
    json: bool,
    max_steps: Option<usize>,
    no_snapshots: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demos => {
            list_demos();
        }
        Commands::Run {
            algorithm,
            demo,
            start,
            target,
            points,
            seed,
            max_coord,
            json,
            max_steps,
            no_snapshots,
        } => {
            let exit_code = run(RunArgs {
                algorithm,
                demo,
                start,
                target,
                points,
                seed,
                max_coord,
                json,
                max_steps,
                no_snapshots,
            });
            process::exit(exit_code);
        }
    }
}

fn list_demos() {
    for demo in Demo::ALL {
        println!("{:<20} {}", demo.name(), demo.description());
    }
}

/// Execute the run subcommand.
///
/// Returns exit code: 0 = success, 1 = input error, 2 = algorithm error.
fn run(args: RunArgs) -> i32 {
    let algorithm: Algorithm = match args.algorithm.parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut config = RunConfig {
        snapshots_enabled: !args.no_snapshots,
        ..RunConfig::default()
    };
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    let mut context = RunContext::new(config);

    // Point algorithms get a seeded random set, graph algorithms a demo
    let points = if algorithm.takes_points() {
        random_points(args.points, args.max_coord, args.seed)
    } else {
        Vec::new()
    };
    let demo = match select_demo(algorithm, args.demo.as_deref()) {
        Ok(demo) => demo,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };
    let graph = demo.map_or_else(Graph::directed, Demo::graph);
    let input = if algorithm.takes_points() {
        Input::Points(&points)
    } else {
        Input::Graph(&graph)
    };

    let mut request = Request::new(algorithm);
    if let Some(start) = args.start.or_else(|| demo.and_then(|d| d.default_start()).map(String::from)) {
        request = request.start(start);
    }
    if let Some(target) = args.target.or_else(|| demo.and_then(|d| d.default_target()).map(String::from)) {
        request = request.target(target);
    }

    let outcome = match run_algorithm(&mut context, input, &request) {
        Ok(run) => run,
        Err(e) if e.is_input_error() => {
            eprintln!("Error: {}", e);
            return 1;
        }
        Err(e) => {
            eprintln!("Algorithm error: {}", e);
            return 2;
        }
    };
    tracing::info!(%algorithm, steps = outcome.len(), "run complete");

    if args.json {
        // Print the whole run as JSON to stdout for machine-readable output
        let json = serde_json::to_string_pretty(outcome).unwrap_or_else(|e| {
            format!("{{\"error\": \"failed to serialize run: {}\"}}", e)
        });
        println!("{}", json);
        return 0;
    }

    match demo {
        Some(demo) => println!("{} on {}", algorithm, demo),
        None => println!("{} on {} random points (seed {})", algorithm, points.len(), args.seed),
    }
    let steps = outcome.len();
    let summary = outcome.summary(input);
    loop {
        let k = context.position();
        if let (Some(kind), Some(text)) = (
            context.last_run().and_then(|r| r.kind_at(k)),
            context.describe_current(input),
        ) {
            println!("{:>5}  {:<16} {}", k, kind, text);
        }
        if !context.advance() {
            break;
        }
    }
    println!("{} steps", steps);
    println!("{}", summary);
    0
}

/// The demo to run a graph algorithm on: the named one, or the algorithm's
/// usual demo. Point algorithms take no demo.
fn select_demo(algorithm: Algorithm, name: Option<&str>) -> Result<Option<Demo>, String> {
    match name {
        Some(name) if algorithm.takes_points() => {
            Err(format!("{} runs on random points, not demo '{}'", algorithm, name))
        }
        Some(name) => name
            .parse()
            .map(Some)
            .map_err(|_| format!("unknown demo '{}', see `algoviz demos`", name)),
        None => Ok(default_demo(algorithm)),
    }
}

fn default_demo(algorithm: Algorithm) -> Option<Demo> {
    match algorithm {
        Algorithm::Bfs | Algorithm::Dfs => Some(Demo::Traversal),
        Algorithm::Closure => Some(Demo::ClosureComponents),
        Algorithm::Topo => Some(Demo::TaskSchedule),
        Algorithm::Kruskal | Algorithm::Prim => Some(Demo::SpanningTree),
        Algorithm::Dijkstra => Some(Demo::ShortestPath),
        Algorithm::HullDc | Algorithm::Graham => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_algorithms_default_to_a_demo() {
        assert_eq!(select_demo(Algorithm::Bfs, None), Ok(Some(Demo::Traversal)));
        assert_eq!(select_demo(Algorithm::Topo, None), Ok(Some(Demo::TaskSchedule)));
        assert_eq!(
            select_demo(Algorithm::Kruskal, Some("spanning-tree")),
            Ok(Some(Demo::SpanningTree))
        );
    }

    #[test]
    fn point_algorithms_reject_a_demo() {
        assert_eq!(select_demo(Algorithm::Graham, None), Ok(None));
        assert!(select_demo(Algorithm::HullDc, Some("traversal")).is_err());
    }

    #[test]
    fn unknown_demo_is_an_error() {
        let err = select_demo(Algorithm::Dfs, Some("nope")).unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "algoviz", "run", "dijkstra", "--start", "B", "--target", "F", "--json", "--max-steps", "50",
        ])
        .unwrap();
        let Commands::Run {
            algorithm,
            start,
            target,
            json,
            max_steps,
            no_snapshots,
            ..
        } = cli.command
        else {
            panic!("expected the run subcommand");
        };
        assert_eq!(algorithm, "dijkstra");
        assert_eq!(start.as_deref(), Some("B"));
        assert_eq!(target.as_deref(), Some("F"));
        assert!(json);
        assert_eq!(max_steps, Some(50));
        assert!(!no_snapshots);
    }

    #[test]
    fn run_exit_codes() {
        let args = |algorithm: &str, max_steps: Option<usize>| RunArgs {
            algorithm: algorithm.to_string(),
            demo: None,
            start: None,
            target: None,
            points: 10,
            seed: 3,
            max_coord: 50,
            json: true,
            max_steps,
            no_snapshots: false,
        };
        assert_eq!(run(args("kruskal", None)), 0);
        assert_eq!(run(args("graham", None)), 0);
        assert_eq!(run(args("quicksort", None)), 1);
        assert_eq!(run(args("dijkstra", Some(2))), 2);
    }
}
