//! 2D integer points and the exact predicates the convex hull engines use.
//!
//! Coordinates are `i64` and every predicate is computed in `i128`, so the
//! orientation test never suffers rounding error and collinear inputs are
//! classified exactly. Exactness holds for coordinates within
//! [`Point::MAX_COORD`] in absolute value: a delta then stays below `2^63`
//! and a difference of two delta products below `2^127`. Engines reject
//! points outside that range with [`check_range`].

use std::cmp::Ordering;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A point in the plane. The derived ordering is lexicographic by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    /// Largest absolute coordinate the exact predicates accept.
    pub const MAX_COORD: i64 = (1 << 62) - 1;

    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Whether both coordinates lie within `-MAX_COORD..=MAX_COORD`.
    pub fn in_range(self) -> bool {
        let range = -Point::MAX_COORD..=Point::MAX_COORD;
        range.contains(&self.x) && range.contains(&self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Turn direction of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Fails on the first point whose coordinates exceed [`Point::MAX_COORD`].
pub fn check_range(points: &[Point]) -> Result<(), CoreError> {
    match points.iter().find(|p| !p.in_range()) {
        Some(&point) => Err(CoreError::CoordinateOutOfRange {
            x: point.x,
            y: point.y,
        }),
        None => Ok(()),
    }
}

/// `to - from`, widened so that no coordinate pair can overflow.
fn delta(from: Point, to: Point) -> (i128, i128) {
    (
        to.x as i128 - from.x as i128,
        to.y as i128 - from.y as i128,
    )
}

/// Cross product of `(q - p)` and `(r - p)`. All three points must be
/// [in range](Point::in_range).
pub fn cross(p: Point, q: Point, r: Point) -> i128 {
    let (ax, ay) = delta(p, q);
    let (bx, by) = delta(p, r);
    ax * by - ay * bx
}

/// Classifies the turn `p -> q -> r` by the sign of the cross product.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    match cross(p, q, r).cmp(&0) {
        Ordering::Greater => Orientation::CounterClockwise,
        Ordering::Less => Orientation::Clockwise,
        Ordering::Equal => Orientation::Collinear,
    }
}

/// Squared Euclidean distance.
pub fn distance_squared(a: Point, b: Point) -> i128 {
    let (dx, dy) = delta(a, b);
    dx * dx + dy * dy
}

/// Half-plane bucket of a direction vector, ordered like `atan2` over
/// `(-pi, pi]`, with the zero vector sorted before everything else.
fn half(dx: i128, dy: i128) -> u8 {
    if dx == 0 && dy == 0 {
        0
    } else if dy < 0 {
        1
    } else if dy > 0 || dx > 0 {
        2
    } else {
        3
    }
}

/// Compares the polar angles of `a` and `b` around `origin`.
///
/// Angles increase counter-clockwise from the negative y half-plane, matching
/// the order of `atan2(dy, dx)`. Points on the same ray compare equal; callers
/// add their own tie-break. This is a total order, so it is safe for sorting.
pub fn polar_cmp(origin: Point, a: Point, b: Point) -> Ordering {
    let (ax, ay) = delta(origin, a);
    let (bx, by) = delta(origin, b);
    half(ax, ay)
        .cmp(&half(bx, by))
        .then_with(|| (ay * bx).cmp(&(ax * by)))
}

/// Generates `count` points with coordinates in `0..=max_coord`, reproducibly
/// for a given `seed`. `max_coord` is clamped to `0..=Point::MAX_COORD`.
pub fn random_points(count: usize, max_coord: i64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let max = max_coord.clamp(0, Point::MAX_COORD);
    (0..count)
        .map(|_| Point::new(rng.gen_range(0..=max), rng.gen_range(0..=max)))
        .collect()
}
