//! Divide-and-conquer convex hull.
//!
//! Points are sorted by `(x, y)` and deduplicated, then split at the median
//! until at most three remain. Sub-hulls are merged by walking the upper and
//! lower tangents with orientation tests.
//!
//! Recursion is replaced by an explicit work stack of frames. A `Solve` frame
//! for a range either builds a base hull or records a `divide` step and
//! schedules `Solve(left)`, `Solve(right)`, `Merge`. Solved sub-hulls wait on
//! a second stack until their `Merge` frame pops them, so steps come out in
//! the same order as the recursive formulation. Base cases record nothing.
//!
//! Snapshots hold the pending sub-hulls: solved, not yet merged.

use serde::Serialize;

use algoviz_core::point::distance_squared;
use algoviz_core::{check_range, orientation, Orientation, Point};

use super::{is_trivial, join_points, passthrough, start_at_lowest, HullOutcome};
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

/// Largest range solved directly.
const BASE_CASE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DivideEvent {
    /// A range was split into two halves at recursion depth `level`.
    Divide {
        level: usize,
        left: Vec<Point>,
        right: Vec<Point>,
    },
    /// Two solved sub-hulls are about to be merged.
    PreMerge {
        level: usize,
        left: Vec<Point>,
        right: Vec<Point>,
    },
    /// The merged hull of a range.
    PostMerge { level: usize, hull: Vec<Point> },
}

impl StepEvent for DivideEvent {
    fn kind(&self) -> &'static str {
        match self {
            DivideEvent::Divide { .. } => "divide",
            DivideEvent::PreMerge { .. } => "pre_merge",
            DivideEvent::PostMerge { .. } => "post_merge",
        }
    }
}

impl DivideEvent {
    pub fn level(&self) -> usize {
        match self {
            DivideEvent::Divide { level, .. }
            | DivideEvent::PreMerge { level, .. }
            | DivideEvent::PostMerge { level, .. } => *level,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DivideEvent::Divide { level, left, right } => format!(
                "level {level}: split into {} left and {} right points",
                left.len(),
                right.len()
            ),
            DivideEvent::PreMerge { level, left, right } => format!(
                "level {level}: merge [{}] with [{}]",
                join_points(left),
                join_points(right)
            ),
            DivideEvent::PostMerge { level, hull } => {
                format!("level {level}: merged hull [{}]", join_points(hull))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivideSnapshot {
    /// Solved sub-hulls waiting for their merge, oldest first.
    pub pending: Vec<Vec<Point>>,
}

pub type DivideRun = Run<HullOutcome, DivideEvent, DivideSnapshot>;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Solve { lo: usize, hi: usize, level: usize },
    Merge { level: usize },
}

pub fn divide_and_conquer(points: &[Point], config: &RunConfig) -> Result<DivideRun, EngineError> {
    check_range(points)?;
    if is_trivial(points) {
        return Ok(passthrough(points));
    }
    let mut sorted = points.to_vec();
    sorted.sort();
    sorted.dedup();
    tracing::debug!(
        points = points.len(),
        distinct = sorted.len(),
        "divide and conquer hull started"
    );

    let mut recorder = StepRecorder::new(config);
    let mut pending: Vec<Vec<Point>> = Vec::new();
    let mut work = vec![Frame::Solve {
        lo: 0,
        hi: sorted.len(),
        level: 0,
    }];

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Solve { lo, hi, level } => {
                if hi - lo <= BASE_CASE {
                    pending.push(base_hull(&sorted[lo..hi]));
                    continue;
                }
                let mid = lo + (hi - lo) / 2;
                recorder.record(
                    DivideEvent::Divide {
                        level,
                        left: sorted[lo..mid].to_vec(),
                        right: sorted[mid..hi].to_vec(),
                    },
                    || DivideSnapshot {
                        pending: pending.clone(),
                    },
                )?;
                work.push(Frame::Merge { level });
                work.push(Frame::Solve {
                    lo: mid,
                    hi,
                    level: level + 1,
                });
                work.push(Frame::Solve {
                    lo,
                    hi: mid,
                    level: level + 1,
                });
            }
            Frame::Merge { level } => {
                let right = pending.pop().unwrap_or_default();
                let left = pending.pop().unwrap_or_default();
                recorder.record(
                    DivideEvent::PreMerge {
                        level,
                        left: left.clone(),
                        right: right.clone(),
                    },
                    || DivideSnapshot {
                        pending: pending.clone(),
                    },
                )?;
                let merged = merge(&left, &right);
                pending.push(merged.clone());
                recorder.record(DivideEvent::PostMerge { level, hull: merged }, || {
                    DivideSnapshot {
                        pending: pending.clone(),
                    }
                })?;
            }
        }
    }

    let mut vertices = pending.pop().unwrap_or_default();
    start_at_lowest(&mut vertices);
    let log = recorder.finish();
    tracing::debug!(vertices = vertices.len(), steps = log.len(), "divide and conquer hull finished");
    Ok(Run {
        result: HullOutcome { vertices },
        log,
    })
}

/// Counter-clockwise hull of at most three distinct sorted points. A
/// collinear triple keeps only its two ends.
fn base_hull(points: &[Point]) -> Vec<Point> {
    match *points {
        [a, b, c] => match orientation(a, b, c) {
            Orientation::CounterClockwise => vec![a, b, c],
            Orientation::Clockwise => vec![a, c, b],
            Orientation::Collinear => vec![a, c],
        },
        _ => points.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

fn next(i: usize, len: usize) -> usize {
    (i + 1) % len
}

fn prev(i: usize, len: usize) -> usize {
    (i + len - 1) % len
}

fn rightmost(hull: &[Point]) -> usize {
    hull.iter()
        .enumerate()
        .max_by_key(|&(_, p)| *p)
        .map_or(0, |(i, _)| i)
}

fn leftmost(hull: &[Point]) -> usize {
    hull.iter()
        .enumerate()
        .min_by_key(|&(_, p)| *p)
        .map_or(0, |(i, _)| i)
}

/// Whether replacing `current` by `candidate` pushes the line from `anchor`
/// further to the `outward` side. On a collinear candidate the farther point
/// wins, so tangent endpoints are always extreme.
fn moves_out(anchor: Point, current: Point, candidate: Point, outward: Orientation) -> bool {
    let turn = orientation(anchor, current, candidate);
    if turn == outward {
        return true;
    }
    turn == Orientation::Collinear
        && distance_squared(anchor, candidate) > distance_squared(anchor, current)
}

/// Indexes `(i, j)` of the upper tangent between `left[i]` and `right[j]`.
fn upper_tangent(left: &[Point], right: &[Point]) -> (usize, usize) {
    let (nl, nr) = (left.len(), right.len());
    let (mut i, mut j) = (rightmost(left), leftmost(right));
    for _ in 0..nl + nr {
        let mut moved = false;
        for _ in 0..nl {
            if !moves_out(right[j], left[i], left[next(i, nl)], Orientation::Clockwise) {
                break;
            }
            i = next(i, nl);
            moved = true;
        }
        for _ in 0..nr {
            if !moves_out(left[i], right[j], right[prev(j, nr)], Orientation::CounterClockwise) {
                break;
            }
            j = prev(j, nr);
            moved = true;
        }
        if !moved {
            break;
        }
    }
    (i, j)
}

/// Indexes `(i, j)` of the lower tangent between `left[i]` and `right[j]`.
fn lower_tangent(left: &[Point], right: &[Point]) -> (usize, usize) {
    let (nl, nr) = (left.len(), right.len());
    let (mut i, mut j) = (rightmost(left), leftmost(right));
    for _ in 0..nl + nr {
        let mut moved = false;
        for _ in 0..nl {
            if !moves_out(right[j], left[i], left[prev(i, nl)], Orientation::CounterClockwise) {
                break;
            }
            i = prev(i, nl);
            moved = true;
        }
        for _ in 0..nr {
            if !moves_out(left[i], right[j], right[next(j, nr)], Orientation::Clockwise) {
                break;
            }
            j = next(j, nr);
            moved = true;
        }
        if !moved {
            break;
        }
    }
    (i, j)
}

/// Appends `hull[from..=to]`, wrapping counter-clockwise.
fn walk(hull: &[Point], from: usize, to: usize, out: &mut Vec<Point>) {
    let mut k = from;
    out.push(hull[k]);
    while k != to {
        k = next(k, hull.len());
        out.push(hull[k]);
    }
}

/// Merges two counter-clockwise hulls where every point of `left` sorts
/// before every point of `right`.
fn merge(left: &[Point], right: &[Point]) -> Vec<Point> {
    if left.is_empty() {
        return right.to_vec();
    }
    if right.is_empty() {
        return left.to_vec();
    }
    let (ui, uj) = upper_tangent(left, right);
    let (li, lj) = lower_tangent(left, right);

    let mut hull = Vec::with_capacity(left.len() + right.len());
    walk(left, ui, li, &mut hull);
    walk(right, lj, uj, &mut hull);
    drop_collinear(&mut hull);
    hull
}

/// `b` lies strictly inside the segment `a`-`c` (given collinearity).
fn strictly_between(a: Point, b: Point, c: Point) -> bool {
    let dot = (a.x as i128 - b.x as i128) * (c.x as i128 - b.x as i128)
        + (a.y as i128 - b.y as i128) * (c.y as i128 - b.y as i128);
    dot < 0
}

/// Removes vertices lying on the segment between their neighbors.
fn drop_collinear(hull: &mut Vec<Point>) {
    while hull.len() >= 3 {
        let n = hull.len();
        let redundant = (0..n).find(|&k| {
            let (a, b, c) = (hull[prev(k, n)], hull[k], hull[next(k, n)]);
            orientation(a, b, c) == Orientation::Collinear && strictly_between(a, b, c)
        });
        match redundant {
            Some(k) => {
                hull.remove(k);
            }
            None => break,
        }
    }
}
