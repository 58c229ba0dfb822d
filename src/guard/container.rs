//! Name-keyed object registry that guards are resolved from.

use super::Guard;
use crate::core::State;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Type-erased object held by a registry.
pub type SharedObject = Arc<dyn Any + Send + Sync>;

type ObjectFactory = Arc<dyn Fn() -> SharedObject + Send + Sync>;

/// Object resolved from a registry, tagged with the name of its concrete
/// type so lookups can report what they actually found.
#[derive(Clone)]
pub struct RegistryEntry {
    type_name: &'static str,
    value: SharedObject,
}

impl RegistryEntry {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Wrap an already shared object whose concrete type is `type_name`.
    pub fn from_shared(type_name: &'static str, value: SharedObject) -> Self {
        Self { type_name, value }
    }

    /// Concrete type of the registered object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Shared handle to the object when it is a `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Lookup service guards are resolved through.
///
/// Implementations may build objects lazily; the guard registry only
/// needs existence checks and retrieval.
pub trait ObjectRegistry: Send + Sync {
    fn has(&self, name: &str) -> bool;

    fn get(&self, name: &str) -> Option<RegistryEntry>;
}

enum Slot {
    Instance(RegistryEntry),
    Factory {
        type_name: &'static str,
        build: ObjectFactory,
        instance: OnceLock<SharedObject>,
    },
}

/// In-memory [`ObjectRegistry`].
///
/// Objects are either registered as ready instances or as factories that
/// run once, on first lookup, and are cached afterwards.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, NamedState, Transition};
/// use waypoint::guard::{Container, ObjectRegistry, PredicateGuard};
///
/// let mut container = Container::new();
/// container.register_guard(
///     "always",
///     PredicateGuard::new(|_ctx: &dyn Context, _t: &Transition<NamedState>| true),
/// );
/// container.register("retries", 3_u32);
///
/// assert!(container.has("always"));
/// assert_eq!(container.get("retries").unwrap().type_name(), "u32");
/// ```
#[derive(Default)]
pub struct Container {
    slots: HashMap<String, Slot>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready instance under `name`, replacing any previous entry.
    ///
    /// A guard stored here resolves only if it is a [`PredicateGuard`] or an
    /// `Arc<dyn Guard<S>>`; other guard types go through
    /// [`register_guard`](Self::register_guard).
    ///
    /// [`PredicateGuard`]: super::PredicateGuard
    pub fn register<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.slots
            .insert(name.into(), Slot::Instance(RegistryEntry::new(value)));
        self
    }

    /// Register a factory that builds the object on first lookup.
    pub fn register_factory<T, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let build: ObjectFactory = Arc::new(move || Arc::new(factory()) as SharedObject);
        self.slots.insert(
            name.into(),
            Slot::Factory {
                type_name: type_name::<T>(),
                build,
                instance: OnceLock::new(),
            },
        );
        self
    }

    /// Register a guard instance under `name`.
    pub fn register_guard<S, G>(&mut self, name: impl Into<String>, guard: G) -> &mut Self
    where
        S: State + 'static,
        G: Guard<S> + 'static,
    {
        let shared: Arc<dyn Guard<S>> = Arc::new(guard);
        self.slots.insert(
            name.into(),
            Slot::Instance(RegistryEntry::from_shared(type_name::<G>(), Arc::new(shared))),
        );
        self
    }

    /// Register a guard built lazily on first lookup.
    pub fn register_guard_factory<S, G, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        S: State + 'static,
        G: Guard<S> + 'static,
        F: Fn() -> G + Send + Sync + 'static,
    {
        let build: ObjectFactory = Arc::new(move || {
            let shared: Arc<dyn Guard<S>> = Arc::new(factory());
            Arc::new(shared) as SharedObject
        });
        self.slots.insert(
            name.into(),
            Slot::Factory {
                type_name: type_name::<G>(),
                build,
                instance: OnceLock::new(),
            },
        );
        self
    }

    /// Builder-style [`register_guard`](Self::register_guard).
    pub fn with_guard<S, G>(mut self, name: impl Into<String>, guard: G) -> Self
    where
        S: State + 'static,
        G: Guard<S> + 'static,
    {
        self.register_guard(name, guard);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ObjectRegistry for Container {
    fn has(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<RegistryEntry> {
        match self.slots.get(name)? {
            Slot::Instance(entry) => Some(entry.clone()),
            Slot::Factory {
                type_name,
                build,
                instance,
            } => {
                let value = instance.get_or_init(|| build()).clone();
                Some(RegistryEntry::from_shared(*type_name, value))
            }
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Container").field("names", &names).finish()
    }
}
