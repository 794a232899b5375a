//! Fragment registries owned by page components

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, error};

use crate::component::Fragment;
use crate::error::ResolveError;
use crate::ident::{ComponentIdent, FragmentIdent};

/// Named fragments owned by one parent component.
///
/// Entries are registered while the parent is being constructed and are
/// read-only afterwards, so lookups take no lock. Registering a name twice
/// keeps the first entry and reports the conflict as a diagnostic; it never
/// fails the caller.
pub struct FragmentRegistry {
    owner: ComponentIdent,
    entries: HashMap<String, Arc<dyn Fragment>>,
}

impl FragmentRegistry {
    /// An empty registry owned by the component with this identity.
    pub fn new(owner: ComponentIdent) -> Self {
        FragmentRegistry {
            owner,
            entries: HashMap::new(),
        }
    }

    /// Identity of the owning component.
    pub fn owner(&self) -> &ComponentIdent {
        &self.owner
    }

    /// Register a fragment under a name; the first registration wins.
    pub fn register(&mut self, name: impl Into<String>, fragment: Arc<dyn Fragment>) {
        let name = name.into();
        if self.entries.contains_key(&name) {
            error!(owner = %self.owner, %name, "duplicate fragment registration, keeping the first");
            return;
        }
        debug!(owner = %self.owner, %name, "registering fragment");
        self.entries.insert(name, fragment);
    }

    /// The fragment registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Fragment>> {
        self.entries.get(name).cloned()
    }

    /// The fragment registered under `name`, or `NotFound` carrying the
    /// fully qualified fragment identity.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Fragment>, ResolveError> {
        self.get(name).ok_or_else(|| {
            ResolveError::not_found(FragmentIdent::new(self.owner.clone(), name))
        })
    }

    /// Names of all registered fragments, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fragments are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FragmentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentRegistry")
            .field("owner", &self.owner)
            .field("fragments", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for FragmentRegistry {
    /// Runs each fragment's teardown hook when the parent goes away.
    fn drop(&mut self) {
        for fragment in self.entries.values() {
            fragment.unload();
        }
    }
}

/// One-time fragment registration shared across equivalent instances.
///
/// Component factories that stamp out many instances of the same identity
/// keep their registry behind a `static SharedFragments`: the first instance
/// runs the registration closure, every later one receives the same shared
/// registry without blocking. Teardown hooks consequently fire once, when
/// the last instance drops.
#[derive(Default)]
pub struct SharedFragments {
    cell: OnceLock<Arc<FragmentRegistry>>,
}

impl SharedFragments {
    /// An uninitialized guard, usable in a `static`.
    pub const fn new() -> Self {
        SharedFragments {
            cell: OnceLock::new(),
        }
    }

    /// The shared registry, constructing it on first call.
    ///
    /// `init` runs at most once even when equivalent instances are built
    /// concurrently; the lock is held only for that first initialization.
    pub fn get_or_init(
        &self,
        owner: &ComponentIdent,
        init: impl FnOnce(&mut FragmentRegistry),
    ) -> Arc<FragmentRegistry> {
        Arc::clone(self.cell.get_or_init(|| {
            let mut registry = FragmentRegistry::new(owner.clone());
            init(&mut registry);
            Arc::new(registry)
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::component::Component;

    #[derive(Debug)]
    struct Inert;

    impl Component for Inert {}
    impl Fragment for Inert {}

    #[derive(Debug)]
    struct Tracked {
        unloads: Arc<AtomicUsize>,
    }

    impl Component for Tracked {}

    impl Fragment for Tracked {
        fn unload(&self) {
            self.unloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn owner() -> ComponentIdent {
        ComponentIdent::new("reports", "summary")
    }

    #[test]
    fn test_registers_and_looks_up_fragments() {
        let mut registry = FragmentRegistry::new(owner());
        registry.register("header", Arc::new(Inert));

        assert!(registry.get("header").is_some());
        assert!(registry.lookup("header").is_ok());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_duplicate_registration_keeps_the_first() {
        let first: Arc<dyn Fragment> = Arc::new(Inert);
        let second: Arc<dyn Fragment> = Arc::new(Inert);

        let mut registry = FragmentRegistry::new(owner());
        registry.register("header", Arc::clone(&first));
        registry.register("header", second);

        assert_eq!(registry.len(), 1);
        let kept = registry.get("header").expect("Should keep an entry");
        assert!(Arc::ptr_eq(&kept, &first));
    }

    #[test]
    fn test_lookup_miss_names_the_qualified_fragment() {
        let registry = FragmentRegistry::new(owner());
        let err = registry.lookup("missing").expect_err("Should miss");

        assert!(err.is_not_found());
        insta::assert_snapshot!(err.to_string(), @"component not found: reports/summary.missing");
    }

    #[test]
    fn test_drop_runs_each_teardown_hook_once() {
        let unloads = Arc::new(AtomicUsize::new(0));

        let mut registry = FragmentRegistry::new(owner());
        registry.register(
            "header",
            Arc::new(Tracked {
                unloads: Arc::clone(&unloads),
            }),
        );
        registry.register(
            "footer",
            Arc::new(Tracked {
                unloads: Arc::clone(&unloads),
            }),
        );

        assert_eq!(unloads.load(Ordering::SeqCst), 0);
        drop(registry);
        assert_eq!(unloads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shared_fragments_initialize_once() {
        static SHARED: SharedFragments = SharedFragments::new();

        let inits = AtomicUsize::new(0);
        let first = SHARED.get_or_init(&owner(), |registry| {
            inits.fetch_add(1, Ordering::SeqCst);
            registry.register("header", Arc::new(Inert));
        });
        let second = SHARED.get_or_init(&owner(), |registry| {
            inits.fetch_add(1, Ordering::SeqCst);
            registry.register("header", Arc::new(Inert));
        });

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }
}
