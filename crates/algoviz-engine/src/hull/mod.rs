//! Convex hull engines over integer points.
//!
//! Both engines return the hull as a strictly convex counter-clockwise
//! vertex sequence starting at the lowest point (smallest `y`, then smallest
//! `x`). Collinear boundary points and duplicates are not hull vertices.
//!
//! Inputs with fewer than three points are returned unchanged with an empty
//! step log. A point with a coordinate beyond [`Point::MAX_COORD`] is
//! malformed input and fails the run before any step is recorded.

pub mod divide;
pub mod graham;

use serde::Serialize;

use algoviz_core::Point;

use crate::recorder::{Run, StepLog};

pub use divide::divide_and_conquer;
pub use graham::graham_scan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HullOutcome {
    /// Hull vertices, counter-clockwise.
    pub vertices: Vec<Point>,
}

/// Below three points there is no polygon to build.
fn is_trivial(points: &[Point]) -> bool {
    points.len() < 3
}

/// Result for trivial input: the points themselves, no steps.
fn passthrough<E, S>(points: &[Point]) -> Run<HullOutcome, E, S> {
    Run {
        result: HullOutcome {
            vertices: points.to_vec(),
        },
        log: StepLog::empty(),
    }
}

/// The point with the smallest `y`, ties broken by smallest `x`.
fn lowest(points: &[Point]) -> Option<Point> {
    points.iter().copied().min_by_key(|p| (p.y, p.x))
}

/// Rotates a cyclic vertex sequence so it starts at its lowest point.
fn start_at_lowest(hull: &mut [Point]) {
    if let Some(start) = lowest(hull) {
        if let Some(at) = hull.iter().position(|&p| p == start) {
            hull.rotate_left(at);
        }
    }
}

fn join_points(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
