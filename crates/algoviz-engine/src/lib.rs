//! Step-recorded algorithm engines.
//!
//! Each engine computes its textbook result and, alongside it, a frozen
//! [`StepLog`](recorder::StepLog) of typed events with owned state snapshots
//! that a presentation layer can replay frame by frame.
//!
//! Graph engines: [`traversal`] (BFS, DFS), [`closure`] (Warshall and SCCs),
//! [`topo`] (Kahn), [`mst`] (Kruskal, Prim), [`dijkstra`].
//! Geometry engines: [`hull`] (divide and conquer, Graham scan).
//! [`run`] dispatches any of them from a name and labels.

pub mod closure;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod hull;
pub mod mst;
pub mod recorder;
pub mod run;
pub mod topo;
pub mod traversal;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::EngineError;
pub use recorder::{Run, Step, StepEvent, StepLog, StepRecorder};
pub use run::{run_algorithm, Algorithm, AlgorithmRun, Input, Request, RunContext};
