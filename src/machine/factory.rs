//! Resolution of state identifiers into state values.

use super::error::MachineError;
use crate::core::{State, Transition};
use std::collections::HashMap;

/// Produces the state value for an identifier stored by a context.
pub trait StateFactory<S: State>: Send + Sync {
    fn get_state(&self, name: &str) -> Result<S, MachineError>;
}

/// State factory backed by a fixed set of states, keyed by name.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{NamedState, State, StateType};
/// use waypoint::machine::{StateCatalog, StateFactory};
///
/// let states = StateCatalog::new()
///     .with_state(NamedState::initial("draft"))
///     .with_state(NamedState::terminal("done"));
///
/// assert_eq!(states.get_state("done").unwrap().state_type(), StateType::Final);
/// assert!(states.get_state("lost").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct StateCatalog<S: State> {
    states: HashMap<String, S>,
}

impl<S: State> Default for StateCatalog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateCatalog<S> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Register a state under its name, replacing any previous one.
    pub fn insert(&mut self, state: S) {
        self.states.insert(state.name().to_string(), state);
    }

    /// Register a state unless a different state already uses its name.
    ///
    /// Re-inserting an identical state is accepted.
    pub fn try_insert(&mut self, state: S) -> Result<(), MachineError> {
        match self.states.get(state.name()) {
            Some(existing) if !existing.is_identical(&state) => {
                Err(MachineError::ConflictingState {
                    name: state.name().to_string(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.insert(state);
                Ok(())
            }
        }
    }

    pub fn with_state(mut self, state: S) -> Self {
        self.insert(state);
        self
    }

    pub fn with_states<I: IntoIterator<Item = S>>(mut self, states: I) -> Self {
        for state in states {
            self.insert(state);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Catalog of every state named in a set of transitions.
    ///
    /// Fails with [`MachineError::ConflictingState`] when two transitions
    /// use the same name for states that are not identical, since only one
    /// of them could ever be resolved.
    pub fn from_transitions<'a, I>(transitions: I) -> Result<Self, MachineError>
    where
        S: 'a,
        I: IntoIterator<Item = &'a Transition<S>>,
    {
        let mut catalog = Self::new();
        for transition in transitions {
            catalog.try_insert(transition.state_from().clone())?;
            catalog.try_insert(transition.state_to().clone())?;
        }
        Ok(catalog)
    }
}

impl<S: State> StateFactory<S> for StateCatalog<S> {
    fn get_state(&self, name: &str) -> Result<S, MachineError> {
        self.states
            .get(name)
            .cloned()
            .ok_or_else(|| MachineError::UnknownState {
                name: name.to_string(),
            })
    }
}
