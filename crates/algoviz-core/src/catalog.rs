//! Built-in demo instances.
//!
//! Each demo is a small hard-coded graph used by the teaching pages: the same
//! instance is rebuilt on every run so that replays are identical.

use std::fmt;
use std::str::FromStr;

use crate::edge::GraphKind;
use crate::error::CoreError;
use crate::graph::Graph;

/// A named demo graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    /// Seven-node undirected tree-like graph for BFS/DFS.
    Traversal,
    /// Six-node weighted undirected graph for Kruskal/Prim.
    SpanningTree,
    /// Six-node weighted directed graph for Dijkstra.
    ShortestPath,
    /// Course prerequisite DAG for topological sort.
    CoursePlan,
    /// Task scheduling DAG for topological sort.
    TaskSchedule,
    /// Numbered DAG for topological sort.
    NumberedDag,
    /// Four-node directed chain `0 -> 1 -> 2 -> 3` for transitive closure.
    ClosureChain,
    /// Five-node directed graph with two strongly connected components.
    ClosureComponents,
}

impl Demo {
    pub const ALL: [Demo; 8] = [
        Demo::Traversal,
        Demo::SpanningTree,
        Demo::ShortestPath,
        Demo::CoursePlan,
        Demo::TaskSchedule,
        Demo::NumberedDag,
        Demo::ClosureChain,
        Demo::ClosureComponents,
    ];

    /// Stable command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Demo::Traversal => "traversal",
            Demo::SpanningTree => "spanning-tree",
            Demo::ShortestPath => "shortest-path",
            Demo::CoursePlan => "course-plan",
            Demo::TaskSchedule => "task-schedule",
            Demo::NumberedDag => "numbered-dag",
            Demo::ClosureChain => "closure-chain",
            Demo::ClosureComponents => "closure-components",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::Traversal => "undirected graph A..G (BFS, DFS)",
            Demo::SpanningTree => "weighted undirected graph A..F (Kruskal, Prim)",
            Demo::ShortestPath => "weighted directed graph A..F (Dijkstra)",
            Demo::CoursePlan => "course prerequisites DAG (topological sort)",
            Demo::TaskSchedule => "task scheduling DAG A..F (topological sort)",
            Demo::NumberedDag => "numbered DAG 1..6 (topological sort)",
            Demo::ClosureChain => "directed chain 0..3 (transitive closure)",
            Demo::ClosureComponents => "directed graph 0..4 with two SCCs (transitive closure)",
        }
    }

    /// Builds a fresh copy of the demo graph.
    pub fn graph(self) -> Graph {
        match self {
            Demo::Traversal => Graph::from_edges(
                GraphKind::Undirected,
                &[
                    ("A", "B"),
                    ("A", "C"),
                    ("B", "D"),
                    ("B", "E"),
                    ("C", "F"),
                    ("C", "G"),
                    ("E", "F"),
                ],
            ),
            Demo::SpanningTree => Graph::from_weighted_edges(
                GraphKind::Undirected,
                &[
                    ("A", "B", 4),
                    ("A", "C", 3),
                    ("B", "C", 2),
                    ("B", "D", 5),
                    ("C", "D", 1),
                    ("D", "E", 7),
                    ("D", "F", 9),
                    ("E", "F", 8),
                ],
            ),
            Demo::ShortestPath => Graph::from_weighted_edges(
                GraphKind::Directed,
                &[
                    ("A", "B", 4),
                    ("A", "C", 2),
                    ("B", "C", 1),
                    ("B", "D", 5),
                    ("C", "D", 8),
                    ("C", "E", 10),
                    ("D", "E", 2),
                    ("D", "F", 6),
                    ("E", "F", 3),
                ],
            ),
            Demo::CoursePlan => Graph::from_edges(
                GraphKind::Directed,
                &[
                    ("Math", "Physics"),
                    ("Math", "Chemistry"),
                    ("Physics", "Electronics"),
                    ("Chemistry", "Biology"),
                    ("Electronics", "Computing"),
                    ("Biology", "Biochemistry"),
                    ("Computing", "AI"),
                ],
            ),
            Demo::TaskSchedule => Graph::from_edges(
                GraphKind::Directed,
                &[
                    ("A", "C"),
                    ("B", "C"),
                    ("B", "D"),
                    ("C", "E"),
                    ("D", "E"),
                    ("E", "F"),
                ],
            ),
            Demo::NumberedDag => Graph::from_edges(
                GraphKind::Directed,
                &[
                    ("1", "2"),
                    ("1", "3"),
                    ("2", "4"),
                    ("3", "4"),
                    ("3", "5"),
                    ("4", "6"),
                    ("5", "6"),
                ],
            ),
            Demo::ClosureChain => matrix_graph(&[
                vec![0, 1, 0, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 0, 1],
                vec![0, 0, 0, 0],
            ]),
            Demo::ClosureComponents => matrix_graph(&[
                vec![0, 1, 0, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![1, 0, 0, 1, 0],
                vec![0, 0, 0, 0, 1],
                vec![0, 0, 0, 1, 0],
            ]),
        }
    }

    /// Default start label for engines that need one.
    pub fn default_start(self) -> Option<&'static str> {
        match self {
            Demo::Traversal | Demo::SpanningTree | Demo::ShortestPath => Some("A"),
            _ => None,
        }
    }

    /// Default target label for shortest-path demos.
    pub fn default_target(self) -> Option<&'static str> {
        match self {
            Demo::ShortestPath => Some("F"),
            _ => None,
        }
    }
}

/// Catalog matrices are square and binary by construction.
fn matrix_graph(rows: &[Vec<u8>]) -> Graph {
    Graph::from_adjacency_matrix(rows).unwrap_or_else(|_| Graph::directed())
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| CoreError::UnknownLabel {
                label: s.to_string(),
            })
    }
}
