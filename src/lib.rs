//! Waypoint: a signal-driven finite state machine runtime
//!
//! A [`Machine`] moves domain objects between named states. The objects
//! themselves carry the current state identifier; the machine holds only
//! the graph and the collaborators it consults, so one machine can drive
//! any number of objects.
//!
//! # Core Concepts
//!
//! - **Context**: a domain object exposing a uid and a mutable state identifier
//! - **Transition**: an edge fired by a named signal or applied directly
//! - **Guard**: a named predicate resolved through an object registry
//! - **Cascade**: after every change, direct transitions are followed
//!   until none is satisfied
//! - **Strictness**: whether several satisfied transitions is an error
//!
//! # Example
//!
//! ```rust
//! use waypoint::builder::MachineBuilder;
//! use waypoint::core::{Context, Transition};
//! use waypoint::guard::{Container, PredicateGuard};
//! use waypoint::state_enum;
//!
//! state_enum! {
//!     enum OrderState {
//!         New,
//!         Paid,
//!         Shipped,
//!     }
//!     initial: [New]
//!     final: [Shipped]
//! }
//!
//! struct Order {
//!     id: String,
//!     state: String,
//!     in_stock: bool,
//! }
//!
//! impl Context for Order {
//!     fn context_uid(&self) -> &str { &self.id }
//!     fn context_state(&self) -> &str { &self.state }
//!     fn set_context_state(&mut self, state: &str) { self.state = state.to_string(); }
//! }
//!
//! let container = Container::new().with_guard(
//!     "in_stock",
//!     PredicateGuard::new(|ctx: &dyn Context, _t: &Transition<OrderState>| {
//!         ctx.context_uid().starts_with("order-")
//!     }),
//! );
//!
//! let machine = MachineBuilder::new()
//!     .name("orders")
//!     .container(container)
//!     .add_transition(Transition::on_signal(OrderState::New, OrderState::Paid, "pay"))
//!     .add_transition(
//!         Transition::direct(OrderState::Paid, OrderState::Shipped).with_guard("in_stock"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut order = Order { id: "order-1".into(), state: "New".into(), in_stock: true };
//! assert!(machine.is_signal_allowed(&order, "pay").unwrap());
//!
//! machine.signal(&mut order, "pay").unwrap();
//! assert_eq!(order.state, "Shipped");
//! # let _ = order.in_stock;
//! ```

pub mod builder;
pub mod core;
pub mod events;
pub mod guard;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, TransitionBuilder};
pub use core::{Context, Event, NamedState, State, StateHistory, StateType, Transition, Trigger};
pub use events::{EventBus, EventFactory};
pub use guard::{Container, Guard, GuardError, GuardRegistry, ObjectRegistry, PredicateGuard};
pub use machine::{
    Machine, MachineError, MachineOptions, MemoryTransitionTable, StateCatalog, StateFactory,
    Strictness, TransitionTable,
};
