//! Signal evaluation and application.

use super::error::MachineError;
use super::factory::StateFactory;
use super::options::MachineOptions;
use super::table::TransitionTable;
use crate::core::{Context, State, Transition, Trigger};
use crate::events::EventFactory;
use crate::guard::{GuardError, GuardRegistry};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Drives contexts between states.
///
/// A machine is built once and shared: it keeps no per-context data, so
/// one instance can serve any number of contexts from any number of
/// threads. Calls against a *single* context must be serialised by the
/// caller.
///
/// Every public call resolves candidates the same way:
///
/// 1. resolve the context's state identifier through the state factory;
/// 2. ask the transition table for transitions answering the trigger;
/// 3. keep the unguarded ones and those whose guard is satisfied;
/// 4. in strict mode, fail if more than one is left, otherwise take the
///    first in table order.
///
/// Errors are raised before the context is touched.
pub struct Machine<S: State + 'static> {
    name: String,
    table: Arc<dyn TransitionTable<S>>,
    states: Arc<dyn StateFactory<S>>,
    events: Arc<dyn EventFactory<S>>,
    guards: GuardRegistry<S>,
    options: MachineOptions,
}

impl<S: State + 'static> Machine<S> {
    /// Assemble a machine from its collaborators.
    ///
    /// Nothing is validated here; [`MachineBuilder`](crate::builder::MachineBuilder)
    /// checks options and guards up front.
    pub fn new(
        name: impl Into<String>,
        table: Arc<dyn TransitionTable<S>>,
        states: Arc<dyn StateFactory<S>>,
        events: Arc<dyn EventFactory<S>>,
        guards: GuardRegistry<S>,
        options: MachineOptions,
    ) -> Self {
        Self {
            name: name.into(),
            table,
            states,
            events,
            guards,
            options,
        }
    }

    /// Name carried by every event this machine dispatches.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options fixed at construction.
    pub fn options(&self) -> &MachineOptions {
        &self.options
    }

    /// Registry guard names are resolved through.
    pub fn guards(&self) -> &GuardRegistry<S> {
        &self.guards
    }

    /// Resolve the context's current state identifier.
    pub fn current_state(&self, context: &dyn Context) -> Result<S, MachineError> {
        self.states.get_state(context.context_state())
    }

    /// Check whether `signal` would fire a transition right now.
    ///
    /// Returns `Ok(false)` when nothing matches. In strict mode an
    /// ambiguous signal is an error, not `true`. Guards are evaluated but
    /// the context is not modified.
    pub fn is_signal_allowed(
        &self,
        context: &dyn Context,
        signal: &str,
    ) -> Result<bool, MachineError> {
        let state = self.current_state(context)?;
        let selected = self.select(context, &state, Trigger::Signal(signal))?;
        Ok(selected.is_some())
    }

    /// Apply `signal` to the context, then cascade direct transitions.
    ///
    /// A signal with no satisfied transition is silently ignored.
    pub fn signal(&self, context: &mut dyn Context, signal: &str) -> Result<(), MachineError> {
        let trigger = Trigger::Signal(signal);
        let state = self.current_state(context)?;

        let Some(transition) = self.select(context, &state, trigger)? else {
            trace!(
                machine = %self.name,
                context = %context.context_uid(),
                state = %state.name(),
                signal,
                "signal has no effect in current state"
            );
            return Ok(());
        };

        self.apply(context, &transition, trigger);
        self.refresh(context)
    }

    /// Apply direct transitions out of the current state until none is
    /// satisfied.
    ///
    /// At most `options.max_cascade_depth` transitions are applied; the
    /// next one fails with [`MachineError::CascadeLimitExceeded`] and
    /// leaves the context where the cascade stopped.
    pub fn refresh(&self, context: &mut dyn Context) -> Result<(), MachineError> {
        let mut applied = 0;

        loop {
            let state = self.current_state(context)?;
            let Some(transition) = self.select(context, &state, Trigger::Direct)? else {
                trace!(
                    machine = %self.name,
                    context = %context.context_uid(),
                    state = %state.name(),
                    applied,
                    "cascade settled"
                );
                return Ok(());
            };

            if applied >= self.options.max_cascade_depth {
                warn!(
                    machine = %self.name,
                    context = %context.context_uid(),
                    state = %state.name(),
                    limit = self.options.max_cascade_depth,
                    "cascade limit exceeded, direct transitions likely form a cycle"
                );
                return Err(MachineError::CascadeLimitExceeded {
                    machine: self.name.clone(),
                    state: state.name().to_string(),
                    limit: self.options.max_cascade_depth,
                });
            }

            self.apply(context, &transition, Trigger::Direct);
            applied += 1;
        }
    }

    fn select(
        &self,
        context: &dyn Context,
        state: &S,
        trigger: Trigger<'_>,
    ) -> Result<Option<Transition<S>>, MachineError> {
        let mut satisfied = Vec::new();
        for transition in self.table.find_transitions(context, state, trigger) {
            if self.is_satisfied(context, &transition)? {
                satisfied.push(transition);
            }
        }

        if satisfied.len() > 1 && self.options.strict.is_strict() {
            warn!(
                machine = %self.name,
                context = %context.context_uid(),
                state = %state.name(),
                %trigger,
                candidates = satisfied.len(),
                "simultaneously satisfied transitions in strict mode"
            );
            return Err(MachineError::Strict {
                machine: self.name.clone(),
                state: state.name().to_string(),
                trigger: trigger.to_string(),
                candidates: satisfied.len(),
            });
        }

        Ok(satisfied.into_iter().next())
    }

    fn is_satisfied(
        &self,
        context: &dyn Context,
        transition: &Transition<S>,
    ) -> Result<bool, GuardError> {
        match transition.guard() {
            None => Ok(true),
            Some(name) => {
                let guard = self.guards.get_guard_callable(name)?;
                Ok(guard(context, transition))
            }
        }
    }

    fn apply(&self, context: &mut dyn Context, transition: &Transition<S>, trigger: Trigger<'_>) {
        context.set_context_state(transition.state_to().name());

        debug!(
            machine = %self.name,
            context = %context.context_uid(),
            from = %transition.state_from().name(),
            to = %transition.state_to().name(),
            %trigger,
            "transition applied"
        );

        let event = self.events.get_event(&self.name, context, transition, trigger);
        self.events.dispatch_event(event);
    }
}

impl<S: State + 'static> fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
