//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring states
//! and transitions with minimal boilerplate, plus a few shorthands for
//! the common transition shapes.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{State, Transition};

/// Create an unguarded transition fired by `signal`.
///
/// # Example
///
/// ```
/// use waypoint::builder::signal_transition;
/// use waypoint::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
///     final: [End]
/// }
///
/// let transition = signal_transition(MyState::Start, MyState::End, "finish");
/// assert_eq!(transition.signal(), Some("finish"));
/// ```
pub fn signal_transition<S: State>(from: S, to: S, signal: impl Into<String>) -> Transition<S> {
    Transition::on_signal(from, to, signal)
}

/// Create an unguarded direct transition, applied during cascades.
pub fn direct_transition<S: State>(from: S, to: S) -> Transition<S> {
    Transition::direct(from, to)
}

/// Create a signal transition gated by the guard registered as `guard`.
///
/// # Example
///
/// ```
/// use waypoint::builder::guarded_transition;
/// use waypoint::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///         End,
///     }
///     final: [End]
/// }
///
/// let transition = guarded_transition(MyState::Start, MyState::Middle, "advance", "has_stock");
/// assert_eq!(transition.guard(), Some("has_stock"));
/// ```
pub fn guarded_transition<S: State>(
    from: S,
    to: S,
    signal: impl Into<String>,
    guard: impl Into<String>,
) -> Transition<S> {
    Transition::on_signal(from, to, signal).with_guard(guard)
}
