//! The frozen, read-only step log handed to playback.

use std::ops::Index;
use std::slice;

use serde::Serialize;

use super::StepEvent;

/// One recorded step: what happened, plus an owned copy of the engine state
/// needed to render it independently of its neighbors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<E, S> {
    /// Position in the log. Equals execution order.
    pub index: usize,
    /// The typed event with its payload.
    pub event: E,
    /// State captured when the step was recorded (None when snapshots are off).
    pub snapshot: Option<S>,
}

impl<E: StepEvent, S> Step<E, S> {
    /// The event tag, e.g. `"dequeue"` or `"accept_edge"`.
    pub fn kind(&self) -> &'static str {
        self.event.kind()
    }
}

/// Ordered sequence of steps for one run, indexable `0..len()`.
///
/// There is no way to mutate a log once the recorder hands it over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StepLog<E, S> {
    steps: Vec<Step<E, S>>,
}

impl<E, S> StepLog<E, S> {
    pub(crate) fn new(steps: Vec<Step<E, S>>) -> Self {
        StepLog { steps }
    }

    /// A log with no steps (tracing disabled or trivial input).
    pub fn empty() -> Self {
        StepLog { steps: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Random access to frame `index`.
    pub fn get(&self, index: usize) -> Option<&Step<E, S>> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step<E, S>> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step<E, S>> {
        self.steps.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Step<E, S>> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step<E, S>] {
        &self.steps
    }

    /// Events only, in order.
    pub fn events(&self) -> impl Iterator<Item = &E> + '_ {
        self.steps.iter().map(|s| &s.event)
    }
}

impl<E: StepEvent, S> StepLog<E, S> {
    /// Event tags in order; handy for asserting the shape of a run.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.event.kind()).collect()
    }

    /// Number of steps with the given tag.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.steps.iter().filter(|s| s.event.kind() == kind).count()
    }
}

impl<E, S> Index<usize> for StepLog<E, S> {
    type Output = Step<E, S>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

impl<'a, E, S> IntoIterator for &'a StepLog<E, S> {
    type Item = &'a Step<E, S>;
    type IntoIter = slice::Iter<'a, Step<E, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
