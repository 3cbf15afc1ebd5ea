//! Improvement notifications.
//!
//! The search loop reports each new best solution to an
//! [`ImprovementSink`]. Sinks never influence the search: a sink that fails
//! to deliver an event drops it.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::solution::Solution;

/// A new best solution found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImprovementEvent {
    /// Iteration that produced the improvement (1-based).
    pub iteration: usize,
    /// New best objective value.
    pub value: i64,
    /// Time since the search started.
    pub elapsed: Duration,
    /// The improving selection.
    pub solution: Solution,
}

/// Receiver of improvement events.
pub trait ImprovementSink {
    fn notify(&mut self, event: &ImprovementEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ImprovementSink for NoopSink {
    fn notify(&mut self, _event: &ImprovementEvent) {}
}

/// Logs events through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ImprovementSink for TracingSink {
    fn notify(&mut self, event: &ImprovementEvent) {
        tracing::info!(
            iteration = event.iteration,
            value = event.value,
            elapsed_ms = event.elapsed.as_millis() as u64,
            selected = %event.solution,
            "new best solution"
        );
    }
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    pub events: Vec<ImprovementEvent>,
}

impl ImprovementSink for VecSink {
    fn notify(&mut self, event: &ImprovementEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards events over an unbounded channel so a separate thread can
/// persist them without stalling the search.
///
/// If the receiver is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<ImprovementEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<ImprovementEvent>) -> Self {
        Self { tx }
    }
}

impl ImprovementSink for ChannelSink {
    fn notify(&mut self, event: &ImprovementEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(iteration = event.iteration, "improvement receiver closed");
        }
    }
}

impl<S: ImprovementSink + ?Sized> ImprovementSink for &mut S {
    fn notify(&mut self, event: &ImprovementEvent) {
        (**self).notify(event);
    }
}

/// Sends each event to two sinks.
#[derive(Debug, Clone, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: ImprovementSink, B: ImprovementSink> ImprovementSink for Tee<A, B> {
    fn notify(&mut self, event: &ImprovementEvent) {
        self.0.notify(event);
        self.1.notify(event);
    }
}
