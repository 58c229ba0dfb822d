//! Resolution of guard names into guard objects.

use super::container::{Container, ObjectRegistry};
use super::error::GuardError;
use super::{Guard, GuardCallable, PredicateGuard};
use crate::core::{Context, State, Transition};
use std::marker::PhantomData;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Turns guard names into guards through an [`ObjectRegistry`].
///
/// Lookups are not cached here: each call goes to the backing registry,
/// which is free to cache on its own (as [`Container`] does for
/// factories).
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, NamedState, Transition};
/// use waypoint::guard::{Container, GuardError, GuardRegistry, PredicateGuard};
///
/// let container = Container::new().with_guard(
///     "never",
///     PredicateGuard::new(|_ctx: &dyn Context, _t: &Transition<NamedState>| false),
/// );
/// let guards: GuardRegistry<NamedState> = GuardRegistry::from(container);
///
/// assert!(guards.get_guard("never").is_ok());
/// assert!(matches!(guards.get_guard("missing"), Err(GuardError::NotFound { .. })));
/// ```
pub struct GuardRegistry<S: State> {
    registry: Arc<dyn ObjectRegistry>,
    _phantom: PhantomData<S>,
}

impl<S: State + 'static> GuardRegistry<S> {
    /// Resolve guards through `registry`.
    pub fn new(registry: Arc<dyn ObjectRegistry>) -> Self {
        Self {
            registry,
            _phantom: PhantomData,
        }
    }

    /// Get the named guard.
    ///
    /// Fails with [`GuardError::NotFound`] when the registry has no such
    /// name and with [`GuardError::Invalid`] when the object found is not
    /// a guard for this state type; the latter reports the object's type.
    ///
    /// Objects stored as `Arc<dyn Guard<S>>` (what
    /// [`Container::register_guard`] does) and bare [`PredicateGuard`]s
    /// are recognised.
    pub fn get_guard(&self, name: &str) -> Result<Arc<dyn Guard<S>>, GuardError> {
        let not_found = || GuardError::NotFound {
            name: name.to_string(),
        };
        if !self.registry.has(name) {
            return Err(not_found());
        }
        let entry = self.registry.get(name).ok_or_else(not_found)?;

        if let Some(guard) = entry.downcast_ref::<Arc<dyn Guard<S>>>() {
            return Ok(Arc::clone(guard));
        }
        if let Some(guard) = entry.downcast_arc::<PredicateGuard<S>>() {
            let guard: Arc<dyn Guard<S>> = guard;
            return Ok(guard);
        }

        Err(GuardError::Invalid {
            name: name.to_string(),
            found: entry.type_name().to_string(),
        })
    }

    /// Get the named guard's `is_satisfied` as a standalone predicate.
    ///
    /// The guard is resolved now, so resolution errors surface here rather
    /// than when the predicate is called.
    pub fn get_guard_callable(&self, name: &str) -> Result<GuardCallable<S>, GuardError> {
        let guard = self.get_guard(name)?;
        Ok(Box::new(
            move |context: &dyn Context, transition: &Transition<S>| {
                guard.is_satisfied(context, transition)
            },
        ))
    }

    /// Resolve every name, accumulating ALL failures instead of stopping
    /// at the first one.
    pub fn verify<'a, I>(&self, names: I) -> Validation<(), NonEmptyVec<GuardError>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let checks: Vec<Validation<(), NonEmptyVec<GuardError>>> = names
            .into_iter()
            .map(|name| match self.get_guard(name) {
                Ok(_) => Validation::success(()),
                Err(error) => Validation::fail(error),
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<S: State + 'static> From<Container> for GuardRegistry<S> {
    fn from(container: Container) -> Self {
        Self::new(Arc::new(container))
    }
}

impl<S: State + 'static> Default for GuardRegistry<S> {
    fn default() -> Self {
        Self::from(Container::new())
    }
}

impl<S: State> Clone for GuardRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            _phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamedState;
    use crate::guard::PredicateGuard;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ticket {
        id: String,
        state: String,
    }

    impl Context for Ticket {
        fn context_uid(&self) -> &str {
            &self.id
        }

        fn context_state(&self) -> &str {
            &self.state
        }

        fn set_context_state(&mut self, state: &str) {
            self.state = state.to_string();
        }
    }

    fn ticket() -> Ticket {
        Ticket {
            id: "TestUID".to_string(),
            state: "open".to_string(),
        }
    }

    fn escalate() -> Transition<NamedState> {
        Transition::on_signal(NamedState::new("open"), NamedState::new("escalated"), "escalate")
            .with_guard("always")
    }

    fn registry() -> GuardRegistry<NamedState> {
        let mut container = Container::new();
        container
            .register_guard(
                "always",
                PredicateGuard::new(|_ctx: &dyn Context, _t: &Transition<NamedState>| true),
            )
            .register_guard(
                "is_open",
                PredicateGuard::new(|ctx: &dyn Context, _t: &Transition<NamedState>| {
                    ctx.context_state() == "open"
                }),
            )
            .register("wrongType", 17_u8)
            .register(
                "other_state_guard",
                Arc::new(PredicateGuard::new(|_ctx: &dyn Context, _t: &Transition<Level>| true))
                    as Arc<dyn Guard<Level>>,
            );
        GuardRegistry::from(container)
    }

    #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
    enum Level {
        Low,
    }

    impl State for Level {
        fn name(&self) -> &str {
            "Low"
        }
    }

    #[test]
    fn missing_guard_is_not_found() {
        let err = registry().get_guard("missing").err().unwrap();

        assert_eq!(
            err,
            GuardError::NotFound {
                name: "missing".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "\"missing\" guard is not found in the object registry"
        );
    }

    #[test]
    fn non_guard_object_is_invalid_and_names_its_type() {
        let err = registry().get_guard("wrongType").err().unwrap();

        assert!(matches!(err, GuardError::Invalid { ref found, .. } if found == "u8"));
        assert!(err.to_string().contains("u8"));
        assert_eq!(err.guard_name(), "wrongType");
    }

    #[test]
    fn guard_for_another_state_type_is_invalid() {
        let err = registry().get_guard("other_state_guard").err().unwrap();
        assert!(matches!(err, GuardError::Invalid { .. }));
    }

    #[test]
    fn repeated_lookups_behave_the_same() {
        let guards = registry();
        let ctx = ticket();
        let transition = escalate();

        let first = guards.get_guard("is_open").unwrap();
        let second = guards.get_guard("is_open").unwrap();
        assert_eq!(
            first.is_satisfied(&ctx, &transition),
            second.is_satisfied(&ctx, &transition)
        );
    }

    #[test]
    fn callable_delegates_to_is_satisfied() {
        let guards = registry();
        let is_open = guards.get_guard_callable("is_open").unwrap();

        let mut ctx = ticket();
        assert!(is_open(&ctx, &escalate()));

        ctx.set_context_state("closed");
        assert!(!is_open(&ctx, &escalate()));
    }

    #[test]
    fn callable_surfaces_resolution_errors_immediately() {
        let result = registry().get_guard_callable("missing");
        assert!(matches!(result, Err(GuardError::NotFound { .. })));
    }

    #[test]
    fn verify_accumulates_every_failure() {
        let guards = registry();

        match guards.verify(["always", "missing", "wrongType", "is_open"]) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, GuardError::NotFound { name } if name == "missing")));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, GuardError::Invalid { name, .. } if name == "wrongType")));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn verify_succeeds_when_all_resolve() {
        let guards = registry();
        assert!(matches!(
            guards.verify(["always", "is_open"]),
            Validation::Success(_)
        ));
    }

    struct AfterHours;

    impl Guard<NamedState> for AfterHours {
        fn is_satisfied(
            &self,
            _context: &dyn Context,
            _transition: &Transition<NamedState>,
        ) -> bool {
            false
        }
    }

    #[test]
    fn predicate_guard_registered_as_plain_object_resolves() {
        let mut container = Container::new();
        container.register(
            "is_closed",
            PredicateGuard::new(|ctx: &dyn Context, _t: &Transition<NamedState>| {
                ctx.context_state() == "closed"
            }),
        );
        let guards: GuardRegistry<NamedState> = GuardRegistry::from(container);

        let is_closed = guards.get_guard("is_closed").unwrap();
        assert!(!is_closed.is_satisfied(&ticket(), &escalate()));
    }

    #[test]
    fn custom_guard_registered_as_plain_object_is_invalid() {
        let mut container = Container::new();
        container.register("after_hours", AfterHours);
        container.register_guard("after_hours_guard", AfterHours);
        let guards: GuardRegistry<NamedState> = GuardRegistry::from(container);

        let err = guards.get_guard("after_hours").err().unwrap();
        assert!(
            matches!(err, GuardError::Invalid { ref found, .. } if found.ends_with("AfterHours"))
        );
        assert!(!err.to_string().contains("must implement"));
        assert!(guards.get_guard("after_hours_guard").is_ok());
    }

    #[test]
    fn factory_guard_is_built_once_on_first_lookup() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);

        let mut container = Container::new();
        container.register_guard_factory("is_open", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            PredicateGuard::new(|ctx: &dyn Context, _t: &Transition<NamedState>| {
                ctx.context_state() == "open"
            })
        });
        let guards: GuardRegistry<NamedState> = GuardRegistry::from(container);
        assert_eq!(builds.load(Ordering::SeqCst), 0);

        let mut ctx = ticket();
        let is_open = guards.get_guard_callable("is_open").unwrap();
        assert!(is_open(&ctx, &escalate()));

        ctx.set_context_state("closed");
        let again = guards.get_guard("is_open").unwrap();
        assert!(!again.is_satisfied(&ctx, &escalate()));
        assert!(matches!(guards.verify(["is_open"]), Validation::Success(_)));

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
