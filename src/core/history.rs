//! Immutable log of dispatched events.
//!
//! A `StateHistory` is the usual thing to feed from an event listener when
//! a host wants to know which path a context took through the graph.

use super::event::Event;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ordered history of applied transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the event added.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Event, NamedState, StateHistory, Transition, Trigger};
///
/// let submit = Transition::on_signal(NamedState::new("draft"), NamedState::new("review"), "submit");
/// let approve = Transition::direct(NamedState::new("review"), NamedState::new("done"));
///
/// let history = StateHistory::new()
///     .record(Event::new("orders", "o-1", &submit, Trigger::Signal("submit")))
///     .record(Event::new("orders", "o-1", &approve, Trigger::Direct));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // draft -> review -> done
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    events: Vec<Event<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record an event, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, event: Event<S>) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    /// Append in place; for listeners holding the history behind a lock.
    pub fn push(&mut self, event: Event<S>) {
        self.events.push(event);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the source state of the
    /// first event, then the target state of each event.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.events.first() {
            path.push(&first.from);
        }
        for event in &self.events {
            path.push(&event.to);
        }
        path
    }

    /// Calculate total duration from first to last event.
    ///
    /// Returns `None` if there are no events.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.events.first(), self.events.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Sub-history of a single context.
    pub fn for_context(&self, context_uid: &str) -> Self {
        Self {
            events: self
                .events
                .iter()
                .filter(|e| e.context_uid == context_uid)
                .cloned()
                .collect(),
        }
    }

    /// Get all events in order.
    pub fn events(&self) -> &[Event<S>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
