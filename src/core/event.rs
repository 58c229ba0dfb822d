//! Event values describing applied transitions.

use super::state::State;
use super::transition::{Transition, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one applied transition.
///
/// Produced by an event factory after the context state changed and
/// handed to `dispatch_event`. The machine does not keep events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Event<S: State> {
    /// Unique event identifier
    pub id: Uuid,
    /// Name of the machine that applied the transition
    pub machine: String,
    /// Context whose state changed
    pub context_uid: String,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Signal that fired the transition, `None` for cascaded direct transitions
    pub signal: Option<String>,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl<S: State> Event<S> {
    pub fn new(
        machine: &str,
        context_uid: &str,
        transition: &Transition<S>,
        trigger: Trigger<'_>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine: machine.to_string(),
            context_uid: context_uid.to_string(),
            from: transition.state_from().clone(),
            to: transition.state_to().clone(),
            signal: trigger.signal().map(str::to_string),
            timestamp: Utc::now(),
        }
    }

    /// Check if the event comes from a cascade rather than a signal.
    pub fn is_direct(&self) -> bool {
        self.signal.is_none()
    }
}
