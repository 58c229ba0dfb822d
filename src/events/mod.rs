//! Event construction and dispatch.
//!
//! After every applied transition, including each cascaded direct one,
//! the machine asks its [`EventFactory`] for an [`Event`] and dispatches
//! it. Dispatch is fire-and-forget: listeners cannot veto or fail a
//! transition.

use crate::core::{Context, Event, State, StateHistory, Transition, Trigger};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::trace;

/// Produces and dispatches transition events.
pub trait EventFactory<S: State>: Send + Sync {
    /// Build the event for a transition that has just been applied.
    fn get_event(
        &self,
        machine: &str,
        context: &dyn Context,
        transition: &Transition<S>,
        trigger: Trigger<'_>,
    ) -> Event<S>;

    /// Notify listeners.
    fn dispatch_event(&self, event: Event<S>);
}

/// Listener callback registered on an [`EventBus`].
pub type Listener<S> = Arc<dyn Fn(&Event<S>) + Send + Sync>;

/// Synchronous in-process event factory.
///
/// Listeners run on the caller's thread, in subscription order, before
/// the machine continues its cascade.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Event, NamedState, Transition, Trigger};
/// use waypoint::events::{EventBus, EventFactory};
///
/// let bus: EventBus<NamedState> = EventBus::new();
/// let history = bus.record_history();
///
/// let t = Transition::direct(NamedState::new("a"), NamedState::new("b"));
/// bus.dispatch_event(Event::new("m", "ctx-1", &t, Trigger::Direct));
///
/// assert_eq!(history.lock().unwrap().len(), 1);
/// ```
pub struct EventBus<S: State> {
    listeners: RwLock<Vec<Listener<S>>>,
}

impl<S: State + 'static> EventBus<S> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Add a listener; it sees every event dispatched from now on.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Event<S>) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Subscribe a listener that appends every event to a shared history.
    pub fn record_history(&self) -> Arc<Mutex<StateHistory<S>>> {
        let history = Arc::new(Mutex::new(StateHistory::new()));
        let sink = Arc::clone(&history);
        self.subscribe(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        });
        history
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<S: State + 'static> Default for EventBus<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State + 'static> EventFactory<S> for EventBus<S> {
    fn get_event(
        &self,
        machine: &str,
        context: &dyn Context,
        transition: &Transition<S>,
        trigger: Trigger<'_>,
    ) -> Event<S> {
        Event::new(machine, context.context_uid(), transition, trigger)
    }

    fn dispatch_event(&self, event: Event<S>) {
        // Listeners may subscribe from inside a callback; do not hold the lock.
        let listeners: Vec<Listener<S>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        trace!(
            event_id = %event.id,
            machine = %event.machine,
            context = %event.context_uid,
            listeners = listeners.len(),
            "dispatching transition event"
        );

        for listener in &listeners {
            listener(&event);
        }
    }
}

impl<S: State> fmt::Debug for EventBus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}
