//! Input model for the step-recorded algorithm engines: labelled graphs with
//! deterministic adjacency order, integer points with exact orientation
//! predicates, and the built-in demo instances.

pub mod catalog;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod point;

// Re-export commonly used types
pub use catalog::Demo;
pub use edge::{Edge, EdgeData, GraphKind, Weight};
pub use error::CoreError;
pub use graph::Graph;
pub use id::{EdgeId, NodeId};
pub use point::{check_range, orientation, random_points, Orientation, Point};
