//! Transition edges and the triggers that select them.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a transition table is asked for: an explicit signal, or the
/// signal-less direct transitions fired during a cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// A named external signal.
    Signal(&'a str),
    /// Direct (automatic) transitions only.
    Direct,
}

impl Trigger<'_> {
    /// Check whether a transition answers this trigger.
    pub fn matches<S: State>(&self, transition: &Transition<S>) -> bool {
        match self {
            Self::Signal(name) => transition.signal() == Some(*name),
            Self::Direct => transition.is_direct(),
        }
    }

    /// Signal name, if any.
    pub fn signal(&self) -> Option<&str> {
        match self {
            Self::Signal(name) => Some(name),
            Self::Direct => None,
        }
    }
}

impl fmt::Display for Trigger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(name) => f.write_str(name),
            Self::Direct => f.write_str("<direct>"),
        }
    }
}

/// Directed edge between two states.
///
/// A transition answers either a named signal, or is *direct* and fires
/// on its own during a cascade, or both. It may name a guard that must be
/// satisfied for it to fire; the guard is resolved by name at evaluation
/// time.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{NamedState, Transition, Trigger};
///
/// let submit = Transition::on_signal(NamedState::new("draft"), NamedState::new("review"), "submit")
///     .with_guard("has_items");
///
/// assert_eq!(submit.signal(), Some("submit"));
/// assert!(submit.has_guard());
/// assert!(Trigger::Signal("submit").matches(&submit));
/// assert!(!Trigger::Direct.matches(&submit));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State> {
    from: S,
    to: S,
    #[serde(default)]
    signal: Option<String>,
    #[serde(default)]
    direct: bool,
    #[serde(default)]
    guard: Option<String>,
}

impl<S: State> Transition<S> {
    /// Transition fired by the named signal.
    pub fn on_signal(from: S, to: S, signal: impl Into<String>) -> Self {
        Self {
            from,
            to,
            signal: Some(signal.into()),
            direct: false,
            guard: None,
        }
    }

    /// Signal-less transition applied automatically during a cascade.
    pub fn direct(from: S, to: S) -> Self {
        Self {
            from,
            to,
            signal: None,
            direct: true,
            guard: None,
        }
    }

    pub(crate) fn from_parts(
        from: S,
        to: S,
        signal: Option<String>,
        direct: bool,
        guard: Option<String>,
    ) -> Self {
        Self {
            from,
            to,
            signal,
            direct,
            guard,
        }
    }

    /// Require the named guard to be satisfied.
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Also make this transition fire during cascades.
    pub fn and_direct(mut self) -> Self {
        self.direct = true;
        self
    }

    pub fn state_from(&self) -> &S {
        &self.from
    }

    pub fn state_to(&self) -> &S {
        &self.to
    }

    pub fn signal(&self) -> Option<&str> {
        self.signal.as_deref()
    }

    pub fn is_direct(&self) -> bool {
        self.direct
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Name of the guard gating this transition.
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Check if this transition is a candidate for `trigger` out of
    /// `current` (pure, guards are not evaluated here).
    pub fn is_candidate(&self, current: &S, trigger: &Trigger<'_>) -> bool {
        self.from.is_identical(current) && trigger.matches(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NamedState, StateType};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::End => "End",
            }
        }

        fn state_type(&self) -> StateType {
            match self {
                Self::End => StateType::Final,
                _ => StateType::Normal,
            }
        }
    }

    #[test]
    fn candidate_requires_matching_source_state() {
        let transition = Transition::on_signal(TestState::Start, TestState::Middle, "go");

        assert!(transition.is_candidate(&TestState::Start, &Trigger::Signal("go")));
        assert!(!transition.is_candidate(&TestState::Middle, &Trigger::Signal("go")));
    }

    #[test]
    fn candidate_requires_matching_signal() {
        let transition = Transition::on_signal(TestState::Start, TestState::Middle, "go");

        assert!(!transition.is_candidate(&TestState::Start, &Trigger::Signal("stop")));
        assert!(!transition.is_candidate(&TestState::Start, &Trigger::Direct));
    }

    #[test]
    fn direct_transition_answers_direct_trigger_only() {
        let transition = Transition::direct(TestState::Middle, TestState::End);

        assert!(transition.is_direct());
        assert_eq!(transition.signal(), None);
        assert!(transition.is_candidate(&TestState::Middle, &Trigger::Direct));
        assert!(!transition.is_candidate(&TestState::Middle, &Trigger::Signal("go")));
    }

    #[test]
    fn signal_transition_can_also_be_direct() {
        let transition = Transition::on_signal(TestState::Start, TestState::End, "skip").and_direct();

        assert!(Trigger::Signal("skip").matches(&transition));
        assert!(Trigger::Direct.matches(&transition));
    }

    #[test]
    fn guard_name_is_optional() {
        let plain = Transition::on_signal(TestState::Start, TestState::Middle, "go");
        let guarded = plain.clone().with_guard("ready");

        assert!(!plain.has_guard());
        assert_eq!(plain.guard(), None);
        assert!(guarded.has_guard());
        assert_eq!(guarded.guard(), Some("ready"));
    }

    #[test]
    fn source_matching_uses_identity_not_name() {
        let transition = Transition::on_signal(NamedState::new("x"), NamedState::new("y"), "go");

        assert!(!transition.is_candidate(&NamedState::direct("x"), &Trigger::Signal("go")));
    }

    #[test]
    fn transition_deserializes_with_defaults() {
        let json = r#"{"from":"Start","to":"Middle","signal":"go"}"#;
        let transition: Transition<TestState> = serde_json::from_str(json).unwrap();

        assert_eq!(transition.state_from(), &TestState::Start);
        assert_eq!(transition.state_to(), &TestState::Middle);
        assert!(!transition.is_direct());
        assert!(!transition.has_guard());
    }

    #[test]
    fn trigger_displays_signal_or_direct_marker() {
        assert_eq!(Trigger::Signal("go").to_string(), "go");
        assert_eq!(Trigger::Direct.to_string(), "<direct>");
        assert_eq!(Trigger::Direct.signal(), None);
    }
}
