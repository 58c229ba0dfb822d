//! Transition tables: where a machine looks up candidate transitions.

use crate::core::{Context, State, Transition, Trigger};

/// Query service answering "which transitions leave this state for this
/// trigger".
///
/// Results must already be filtered to transitions whose source state
/// `is_identical` to `state` and that answer `trigger`, and must be in a
/// stable order: in lenient mode the machine applies the first satisfied
/// one.
pub trait TransitionTable<S: State>: Send + Sync {
    fn find_transitions(
        &self,
        context: &dyn Context,
        state: &S,
        trigger: Trigger<'_>,
    ) -> Vec<Transition<S>>;
}

/// Transition table held in memory, answering in insertion order.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{NamedState, Transition};
/// use waypoint::machine::MemoryTransitionTable;
///
/// let table = MemoryTransitionTable::new()
///     .with(Transition::on_signal(NamedState::new("draft"), NamedState::new("review"), "submit"))
///     .with(Transition::direct(NamedState::new("review"), NamedState::new("done")).with_guard("approved"));
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.guard_names(), vec!["approved"]);
/// ```
#[derive(Clone, Debug)]
pub struct MemoryTransitionTable<S: State> {
    transitions: Vec<Transition<S>>,
}

impl<S: State> Default for MemoryTransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> MemoryTransitionTable<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn add(&mut self, transition: Transition<S>) {
        self.transitions.push(transition);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, transition: Transition<S>) -> Self {
        self.add(transition);
        self
    }

    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    /// Distinct guard names referenced by the table, in first-seen order.
    pub fn guard_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.transitions.iter().filter_map(Transition::guard) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: State> FromIterator<Transition<S>> for MemoryTransitionTable<S> {
    fn from_iter<I: IntoIterator<Item = Transition<S>>>(iter: I) -> Self {
        Self {
            transitions: iter.into_iter().collect(),
        }
    }
}

impl<S: State> TransitionTable<S> for MemoryTransitionTable<S> {
    fn find_transitions(
        &self,
        _context: &dyn Context,
        state: &S,
        trigger: Trigger<'_>,
    ) -> Vec<Transition<S>> {
        self.transitions
            .iter()
            .filter(|t| t.is_candidate(state, &trigger))
            .cloned()
            .collect()
    }
}
