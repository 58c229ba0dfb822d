//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{State, Transition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State> {
    from: Option<S>,
    to: Option<S>,
    signal: Option<String>,
    direct: bool,
    guard: Option<String>,
}

impl<S: State> TransitionBuilder<S> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            signal: None,
            direct: false,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Fire on the named signal.
    pub fn on(mut self, signal: impl Into<String>) -> Self {
        self.signal = Some(signal.into());
        self
    }

    /// Fire automatically during cascades.
    pub fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    /// Gate on a guard resolved by name (optional).
    pub fn guard(mut self, name: impl Into<String>) -> Self {
        self.guard = Some(name.into());
        self
    }

    /// Build the transition.
    ///
    /// At least one of `.on()` and `.direct()` is required.
    pub fn build(self) -> Result<Transition<S>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        if self.signal.is_none() && !self.direct {
            return Err(BuildError::MissingTrigger);
        }

        Ok(Transition::from_parts(
            from,
            to,
            self.signal,
            self.direct,
            self.guard,
        ))
    }
}

impl<S: State> Default for TransitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
