//! Fragment lifecycle: shared registration and teardown hooks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use heddle::{
    Component, ComponentIdent, ComponentLibrary, Fragment, FragmentRegistry, LibraryLoader,
    Loader, Page, SharedFragments, UrlMap,
};

/// Fragment that counts how often its teardown hook runs.
#[derive(Debug)]
struct Signal {
    unloads: Arc<AtomicUsize>,
}

impl Component for Signal {}

impl Fragment for Signal {
    fn unload(&self) {
        self.unloads.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_unload_hooks_run_when_the_last_handle_drops() {
    let unloads = Arc::new(AtomicUsize::new(0));
    let ident = ComponentIdent::parse("reports/summary");

    let mut registry = FragmentRegistry::new(ident.clone());
    registry.register(
        "header",
        Arc::new(Signal {
            unloads: Arc::clone(&unloads),
        }),
    );
    registry.register(
        "footer",
        Arc::new(Signal {
            unloads: Arc::clone(&unloads),
        }),
    );
    let registry = Arc::new(registry);

    let first = Page::with_fragments(ident.clone(), Arc::clone(&registry));
    let second = Page::with_fragments(ident, Arc::clone(&registry));
    drop(registry);

    drop(first);
    assert_eq!(unloads.load(Ordering::SeqCst), 0);

    drop(second);
    assert_eq!(unloads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shared_fragments_register_once_across_threads() {
    static SHARED: SharedFragments = SharedFragments::new();

    let ident = ComponentIdent::parse("reports/summary");
    let inits = AtomicUsize::new(0);

    let registries: Vec<Arc<FragmentRegistry>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    SHARED.get_or_init(&ident, |registry| {
                        inits.fetch_add(1, Ordering::SeqCst);
                        registry.register(
                            "header",
                            Arc::new(Signal {
                                unloads: Arc::new(AtomicUsize::new(0)),
                            }),
                        );
                    })
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("Thread should finish"))
            .collect()
    });

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert_eq!(registries[0].len(), 1);
    for registry in &registries[1..] {
        assert!(Arc::ptr_eq(&registries[0], registry));
    }
}

#[test]
fn test_eviction_releases_the_instance() {
    let unloads = Arc::new(AtomicUsize::new(0));
    let ident = ComponentIdent::new("reports", "summary");

    let library = ComponentLibrary::new("reports").with_component("summary", {
        let unloads = Arc::clone(&unloads);
        let ident = ident.clone();
        move || {
            let mut registry = FragmentRegistry::new(ident.clone());
            registry.register(
                "header",
                Arc::new(Signal {
                    unloads: Arc::clone(&unloads),
                }),
            );
            Arc::new(Page::with_fragments(ident.clone(), Arc::new(registry)))
        }
    });

    let mut loader = LibraryLoader::new();
    loader.add_library(library);
    let mapper = UrlMap::new();

    let held = loader.fetch(&ident, &mapper).expect("Should fetch");
    assert!(loader.evict(&ident));

    // The outstanding handle keeps the instance alive past eviction.
    assert_eq!(unloads.load(Ordering::SeqCst), 0);
    drop(held);
    assert_eq!(unloads.load(Ordering::SeqCst), 1);

    // A refetch builds a fresh instance with fresh hooks.
    let again = loader.fetch(&ident, &mapper).expect("Should refetch");
    drop(again);
    assert_eq!(unloads.load(Ordering::SeqCst), 1);
}
