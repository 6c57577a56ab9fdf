//! In-memory tick trace.
//!
//! The machine records every executed state change (including the initial
//! `start`) as an ordered, immutable trace. The trace lives in memory only;
//! it exists for inspection, testing and export, not for restoring a
//! machine after a restart.

use super::key::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single executed state change.
///
/// `from` is `None` for the event recorded by `start`. `tick` is the value
/// of the machine's tick counter at the time the change executed; drained
/// requests each count as their own tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TickEvent<K: StateKey> {
    /// The state being left, if the machine was already started
    pub from: Option<K>,
    /// The state being entered
    pub to: K,
    /// Tick counter value when the change executed
    pub tick: u64,
    /// When the change executed
    pub timestamp: DateTime<Utc>,
}

/// Ordered trace of executed state changes.
///
/// The trace is immutable - `record` returns a new trace with the event
/// appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use clockstep::core::{TickEvent, TickTrace};
/// use chrono::Utc;
///
/// let trace: TickTrace<i32> = TickTrace::new();
/// let trace = trace.record(TickEvent {
///     from: None,
///     to: 1,
///     tick: 0,
///     timestamp: Utc::now(),
/// });
/// let trace = trace.record(TickEvent {
///     from: Some(1),
///     to: 2,
///     tick: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(trace.path(), vec![1, 2]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TickTrace<K: StateKey> {
    events: Vec<TickEvent<K>>,
}

impl<K: StateKey> Default for TickTrace<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> TickTrace<K> {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record an event, returning a new trace.
    pub fn record(&self, event: TickEvent<K>) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    /// All recorded events, in order.
    pub fn events(&self) -> &[TickEvent<K>] {
        &self.events
    }

    /// Keys of the states visited, in order.
    ///
    /// The initial state appears once (via the `start` event's `to`), then
    /// every subsequent destination.
    pub fn path(&self) -> Vec<K> {
        self.events.iter().map(|e| e.to).collect()
    }

    /// Wall-clock span from the first to the last event.
    ///
    /// `None` for an empty trace.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.events.first()?, self.events.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
