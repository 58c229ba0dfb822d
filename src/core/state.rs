//! State values and their type tags.
//!
//! A context stores only a state *identifier*; the machine resolves that
//! identifier into a `State` value through a state factory and compares
//! states with `is_identical`, never by name alone.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Classification of a state within a transition graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    /// Entry point of a graph.
    Initial,
    /// Ordinary state, left only by an explicit signal or a direct transition.
    #[default]
    Normal,
    /// Transient state expected to be left automatically by a cascade.
    Direct,
    /// Terminal state.
    Final,
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "initial",
            Self::Normal => "normal",
            Self::Direct => "direct",
            Self::Final => "final",
        };
        f.write_str(label)
    }
}

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transitions and events
/// - `PartialEq`: backs the default identity comparison
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: events carrying states can be persisted
///
/// # Example
///
/// ```rust
/// use waypoint::core::{State, StateType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Routing,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Routing => "Routing",
///             Self::Complete => "Complete",
///         }
///     }
///
///     fn state_type(&self) -> StateType {
///         match self {
///             Self::Pending => StateType::Initial,
///             Self::Routing => StateType::Direct,
///             Self::Complete => StateType::Final,
///         }
///     }
/// }
///
/// assert!(TaskState::Complete.is_final());
/// assert!(TaskState::Pending.is_identical(&TaskState::Pending));
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Identifier stored by contexts and used for display/logging.
    fn name(&self) -> &str;

    /// Type tag of the state.
    ///
    /// Default implementation returns [`StateType::Normal`].
    fn state_type(&self) -> StateType {
        StateType::Normal
    }

    /// Canonical identity comparison used to match a transition's source
    /// state against the current state.
    ///
    /// Default implementation is value equality.
    fn is_identical(&self, other: &Self) -> bool {
        self == other
    }

    /// Check if this is a final (terminal) state.
    fn is_final(&self) -> bool {
        self.state_type() == StateType::Final
    }

    /// Check if this state is expected to be left by a cascade.
    fn is_direct(&self) -> bool {
        self.state_type() == StateType::Direct
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// General-purpose state value: a name and a type tag.
///
/// Two `NamedState`s are identical only when both the name and the type
/// tag match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedState {
    name: String,
    #[serde(default)]
    state_type: StateType,
}

impl NamedState {
    /// A [`StateType::Normal`] state.
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(name, StateType::Normal)
    }

    pub fn typed(name: impl Into<String>, state_type: StateType) -> Self {
        Self {
            name: name.into(),
            state_type,
        }
    }

    pub fn initial(name: impl Into<String>) -> Self {
        Self::typed(name, StateType::Initial)
    }

    pub fn direct(name: impl Into<String>) -> Self {
        Self::typed(name, StateType::Direct)
    }

    pub fn terminal(name: impl Into<String>) -> Self {
        Self::typed(name, StateType::Final)
    }
}

impl State for NamedState {
    fn name(&self) -> &str {
        &self.name
    }

    fn state_type(&self) -> StateType {
        self.state_type
    }
}

impl fmt::Display for NamedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.state_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
        Failed,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
                Self::Failed => "Failed",
            }
        }

        fn state_type(&self) -> StateType {
            match self {
                Self::Initial => StateType::Initial,
                Self::Processing => StateType::Normal,
                Self::Complete | Self::Failed => StateType::Final,
            }
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Failed)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::Failed.name(), "Failed");
    }

    #[test]
    fn is_final_follows_state_type() {
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Processing.is_final());
        assert!(TestState::Complete.is_final());
        assert!(TestState::Failed.is_final());
    }

    #[test]
    fn is_error_identifies_error_states() {
        assert!(!TestState::Complete.is_error());
        assert!(TestState::Failed.is_error());
    }

    #[test]
    fn default_identity_is_value_equality() {
        assert!(TestState::Processing.is_identical(&TestState::Processing));
        assert!(!TestState::Processing.is_identical(&TestState::Complete));
    }

    #[test]
    fn named_states_with_same_name_but_different_type_are_not_identical() {
        let normal = NamedState::new("review");
        let direct = NamedState::direct("review");

        assert_eq!(normal.name(), direct.name());
        assert!(!normal.is_identical(&direct));
        assert!(normal.is_identical(&NamedState::new("review")));
        assert!(direct.is_direct());
    }

    #[test]
    fn named_state_defaults_to_normal_when_type_missing() {
        let state: NamedState = serde_json::from_str(r#"{"name":"draft"}"#).unwrap();
        assert_eq!(state.state_type(), StateType::Normal);
        assert_eq!(state, NamedState::new("draft"));
    }

    #[test]
    fn state_type_serializes_in_snake_case() {
        let json = serde_json::to_string(&NamedState::terminal("done")).unwrap();
        assert_eq!(json, r#"{"name":"done","state_type":"final"}"#);
    }

    #[test]
    fn named_state_displays_name_and_type() {
        assert_eq!(NamedState::initial("draft").to_string(), "draft (initial)");
    }
}
