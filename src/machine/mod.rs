//! The signal-driven machine and its collaborators.
//!
//! # Key Concepts
//!
//! - **Machine**: resolves, guards and applies transitions for any context
//! - **TransitionTable**: answers candidate queries for a state and trigger
//! - **StateFactory**: turns a context's state identifier into a state
//! - **MachineOptions**: strictness policy and cascade cap, fixed at build time

mod engine;
mod error;
mod factory;
mod options;
mod table;

pub use engine::Machine;
pub use error::MachineError;
pub use factory::{StateCatalog, StateFactory};
pub use options::{
    MachineOptions, OptionsError, Strictness, DEFAULT_MAX_CASCADE_DEPTH, OPTIONS_KEY_STRICT,
    STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS,
};
pub use table::{MemoryTransitionTable, TransitionTable};
