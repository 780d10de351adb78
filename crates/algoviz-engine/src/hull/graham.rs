//! Graham scan.
//!
//! The pivot is the lowest point. Every other point (copies of the pivot
//! excluded) is sorted by polar angle around it, nearer points first on equal
//! angles. The scan pops while the top two stack entries and the incoming
//! point do not make a strict left turn, so collinear points never survive.

use serde::Serialize;

use algoviz_core::point::{distance_squared, polar_cmp};
use algoviz_core::{check_range, orientation, Orientation, Point};

use super::{is_trivial, join_points, lowest, passthrough, HullOutcome};
use crate::config::RunConfig;
use crate::error::EngineError;
use crate::recorder::{Run, StepEvent, StepRecorder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrahamEvent {
    /// The pivot was chosen.
    FindStart { pivot: Point },
    /// The remaining points in scan order.
    SortByAngle { order: Vec<Point> },
    Push { point: Point },
    /// `point` was removed because it does not turn left towards `against`.
    Pop { point: Point, against: Point },
}

impl StepEvent for GrahamEvent {
    fn kind(&self) -> &'static str {
        match self {
            GrahamEvent::FindStart { .. } => "find_start",
            GrahamEvent::SortByAngle { .. } => "sort_by_angle",
            GrahamEvent::Push { .. } => "push",
            GrahamEvent::Pop { .. } => "pop",
        }
    }
}

impl GrahamEvent {
    pub fn describe(&self) -> String {
        match self {
            GrahamEvent::FindStart { pivot } => format!("start from the lowest point {pivot}"),
            GrahamEvent::SortByAngle { order } => {
                format!("sort by angle around the pivot: {}", join_points(order))
            }
            GrahamEvent::Push { point } => format!("push {point}"),
            GrahamEvent::Pop { point, against } => {
                format!("pop {point}, no left turn towards {against}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrahamSnapshot {
    /// Stack contents, bottom first.
    pub stack: Vec<Point>,
}

pub type GrahamRun = Run<HullOutcome, GrahamEvent, GrahamSnapshot>;

pub fn graham_scan(points: &[Point], config: &RunConfig) -> Result<GrahamRun, EngineError> {
    check_range(points)?;
    if is_trivial(points) {
        return Ok(passthrough(points));
    }
    let Some(pivot) = lowest(points) else {
        return Ok(passthrough(points));
    };
    tracing::debug!(points = points.len(), %pivot, "graham scan started");

    let mut recorder = StepRecorder::new(config);
    let mut stack: Vec<Point> = Vec::new();
    recorder.record(GrahamEvent::FindStart { pivot }, || GrahamSnapshot {
        stack: stack.clone(),
    })?;

    let mut rest: Vec<Point> = points.iter().copied().filter(|&p| p != pivot).collect();
    rest.sort_by(|&a, &b| {
        polar_cmp(pivot, a, b)
            .then_with(|| distance_squared(pivot, a).cmp(&distance_squared(pivot, b)))
    });
    recorder.record(
        GrahamEvent::SortByAngle {
            order: rest.clone(),
        },
        || GrahamSnapshot {
            stack: stack.clone(),
        },
    )?;

    stack.push(pivot);
    recorder.record(GrahamEvent::Push { point: pivot }, || GrahamSnapshot {
        stack: stack.clone(),
    })?;

    for point in rest {
        while let [.., below, top] = stack[..] {
            if orientation(below, top, point) == Orientation::CounterClockwise {
                break;
            }
            stack.pop();
            recorder.record(
                GrahamEvent::Pop {
                    point: top,
                    against: point,
                },
                || GrahamSnapshot {
                    stack: stack.clone(),
                },
            )?;
        }
        stack.push(point);
        recorder.record(GrahamEvent::Push { point }, || GrahamSnapshot {
            stack: stack.clone(),
        })?;
    }

    let log = recorder.finish();
    tracing::debug!(vertices = stack.len(), steps = log.len(), "graham scan finished");
    Ok(Run {
        result: HullOutcome { vertices: stack },
        log,
    })
}
