//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, Transition};
use crate::events::{EventBus, EventFactory};
use crate::guard::{Container, GuardRegistry};
use crate::machine::{
    Machine, MachineOptions, MemoryTransitionTable, StateCatalog, StateFactory, Strictness,
    TransitionTable,
};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for constructing machines with a fluent API.
///
/// Transitions can be given one by one, in which case the builder owns a
/// [`MemoryTransitionTable`], derives a [`StateCatalog`] from them unless a
/// state factory is supplied, and checks up front that every guard they
/// name resolves. Alternatively a ready table can be plugged in with
/// [`table`](Self::table).
pub struct MachineBuilder<S: State + 'static> {
    name: Option<String>,
    table: Option<Arc<dyn TransitionTable<S>>>,
    transitions: Vec<Transition<S>>,
    states: Option<Arc<dyn StateFactory<S>>>,
    events: Option<Arc<dyn EventFactory<S>>>,
    guards: Option<GuardRegistry<S>>,
    options: MachineOptions,
}

impl<S: State + 'static> MachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            table: None,
            transitions: Vec::new(),
            states: None,
            events: None,
            guards: None,
            options: MachineOptions::default(),
        }
    }

    /// Set the machine name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Use an existing transition table.
    pub fn table(mut self, table: Arc<dyn TransitionTable<S>>) -> Self {
        self.table = Some(table);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Resolve state identifiers with `states` instead of a catalog
    /// derived from the transitions.
    pub fn state_factory(mut self, states: Arc<dyn StateFactory<S>>) -> Self {
        self.states = Some(states);
        self
    }

    /// Defaults to an [`EventBus`] without listeners.
    pub fn event_factory(mut self, events: Arc<dyn EventFactory<S>>) -> Self {
        self.events = Some(events);
        self
    }

    /// Defaults to an empty registry.
    pub fn guards(mut self, guards: GuardRegistry<S>) -> Self {
        self.guards = Some(guards);
        self
    }

    /// Resolve guards from a [`Container`].
    pub fn container(self, container: Container) -> Self {
        self.guards(GuardRegistry::from(container))
    }

    /// Replace all options at once.
    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for switching strict mode on or off.
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = if strict {
            Strictness::SimultaneousSignalTransitions
        } else {
            Strictness::Lenient
        };
        self
    }

    /// Cap on direct transitions applied per `refresh`.
    pub fn max_cascade_depth(mut self, depth: usize) -> Self {
        self.options.max_cascade_depth = depth;
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing, the options are
    /// invalid, or (for builder-owned tables) a guard does not resolve.
    pub fn build(self) -> Result<Machine<S>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        self.options.validate()?;
        let guards = self.guards.unwrap_or_default();

        let (table, states): (Arc<dyn TransitionTable<S>>, Arc<dyn StateFactory<S>>) =
            match (self.table, self.transitions.is_empty()) {
                (Some(_), false) => return Err(BuildError::ConflictingTables),
                (Some(table), true) => {
                    let states = self.states.ok_or(BuildError::MissingStateFactory)?;
                    (table, states)
                }
                (None, true) => return Err(BuildError::MissingTable),
                (None, false) => {
                    let table: MemoryTransitionTable<S> = self.transitions.into_iter().collect();

                    if let Validation::Failure(errors) = guards.verify(table.guard_names()) {
                        return Err(BuildError::UnresolvedGuards(
                            errors.iter().cloned().collect(),
                        ));
                    }

                    let states: Arc<dyn StateFactory<S>> = match self.states {
                        Some(states) => states,
                        None => Arc::new(StateCatalog::from_transitions(table.transitions())?),
                    };
                    let table: Arc<dyn TransitionTable<S>> = Arc::new(table);
                    (table, states)
                }
            };

        let events: Arc<dyn EventFactory<S>> = match self.events {
            Some(events) => events,
            None => Arc::new(EventBus::<S>::new()),
        };

        Ok(Machine::new(
            name,
            table,
            states,
            events,
            guards,
            self.options,
        ))
    }
}

impl<S: State + 'static> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
