//! Core value types and capabilities.
//!
//! This module contains the pieces every other module speaks in:
//! - State definitions via the `State` trait
//! - Transition edges and the `Trigger` that selects them
//! - The `Context` capability implemented by domain objects
//! - Event values and the immutable history built from them

mod context;
mod event;
mod history;
mod state;
mod transition;

pub use context::Context;
pub use event::Event;
pub use history::StateHistory;
pub use state::{NamedState, State, StateType};
pub use transition::{Transition, Trigger};
