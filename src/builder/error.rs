//! Build errors for machine and transition builders.

use crate::guard::GuardError;
use crate::machine::{MachineError, OptionsError};
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Machine name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("No transitions defined. Call .table(table) or add at least one transition")]
    MissingTable,

    #[error("Both a transition table and individual transitions were given. Use one or the other")]
    ConflictingTables,

    #[error("State factory not specified. Call .state_factory(factory) when using .table()")]
    MissingStateFactory,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition trigger not specified. Call .on(signal) or .direct()")]
    MissingTrigger,

    #[error("Unresolved guards: {}", join_errors(.0))]
    UnresolvedGuards(Vec<GuardError>),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    States(#[from] MachineError),
}

fn join_errors(errors: &[GuardError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
