//! Guard predicates and their resolution by name.
//!
//! Transitions refer to guards by name only. At evaluation time the
//! machine asks a [`GuardRegistry`] to resolve the name through an
//! [`ObjectRegistry`] and calls the guard's `is_satisfied`.

mod container;
mod error;
mod registry;

pub use container::{Container, ObjectRegistry, RegistryEntry, SharedObject};
pub use error::GuardError;
pub use registry::GuardRegistry;

use crate::core::{Context, State, Transition};

/// Guard resolved to a plain predicate.
pub type GuardCallable<S> = Box<dyn Fn(&dyn Context, &Transition<S>) -> bool + Send + Sync>;

/// Predicate deciding whether a transition may fire for a context.
///
/// Guards must not mutate the context; they may be evaluated by
/// `is_signal_allowed`, which is a pure query.
pub trait Guard<S: State>: Send + Sync {
    fn is_satisfied(&self, context: &dyn Context, transition: &Transition<S>) -> bool;
}

/// Guard backed by a closure.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, NamedState, Transition};
/// use waypoint::guard::{Guard, PredicateGuard};
///
/// struct Cart {
///     id: String,
///     state: String,
///     items: usize,
/// }
///
/// impl Context for Cart {
///     fn context_uid(&self) -> &str { &self.id }
///     fn context_state(&self) -> &str { &self.state }
///     fn set_context_state(&mut self, state: &str) { self.state = state.to_string(); }
/// }
///
/// let not_draft = PredicateGuard::new(|ctx: &dyn Context, _t: &Transition<NamedState>| {
///     ctx.context_state() != "draft"
/// });
///
/// let cart = Cart { id: "c-1".into(), state: "draft".into(), items: 2 };
/// let checkout = Transition::on_signal(NamedState::new("draft"), NamedState::new("paid"), "pay");
/// assert!(!not_draft.is_satisfied(&cart, &checkout));
/// # let _ = cart.items;
/// ```
pub struct PredicateGuard<S: State> {
    predicate: GuardCallable<S>,
}

impl<S: State> PredicateGuard<S> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be thread-safe (Send + Sync) and should not
    /// have side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn Context, &Transition<S>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<S: State> Guard<S> for PredicateGuard<S> {
    fn is_satisfied(&self, context: &dyn Context, transition: &Transition<S>) -> bool {
        (self.predicate)(context, transition)
    }
}
