//! Machine errors.

use crate::guard::GuardError;
use thiserror::Error;

/// Errors that halt a machine call.
///
/// All of them are configuration or modelling defects; none is retried.
/// An unmatched signal is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// More than one transition was satisfied at once in strict mode.
    #[error(
        "Machine \"{machine}\" has {candidates} simultaneously satisfied transitions for \
         \"{trigger}\" from state \"{state}\""
    )]
    Strict {
        machine: String,
        state: String,
        trigger: String,
        candidates: usize,
    },

    /// A single `refresh` applied more direct transitions than allowed.
    #[error(
        "Machine \"{machine}\" exceeded the cascade limit of {limit} direct transitions at state \
         \"{state}\""
    )]
    CascadeLimitExceeded {
        machine: String,
        state: String,
        limit: usize,
    },

    /// The state factory does not know the context's state identifier.
    #[error("Unknown state \"{name}\"")]
    UnknownState { name: String },

    /// Two different states share one identifier.
    #[error("State \"{name}\" is defined more than once with different types")]
    ConflictingState { name: String },

    #[error(transparent)]
    Guard(#[from] GuardError),
}
