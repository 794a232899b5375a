//! In-memory component libraries and the loader over them
//!
//! A deployment's real components come out of compiled shared libraries;
//! this loader serves the same [`Loader`] contract from registered factory
//! closures instead. It backs the site-map dry-run resolver and is the
//! reference for the caching semantics: `fetch` shares one instance per
//! identity, `create` always builds a fresh one, and evicting a cached
//! instance lets teardown hooks run once the last handle drops.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::component::Component;
use crate::error::ResolveError;
use crate::ident::ComponentIdent;
use crate::service::{Loader, UrlMapper};

type Factory = Box<dyn Fn() -> Arc<dyn Component> + Send + Sync>;

/// A named library of component factories plus their locale data.
pub struct ComponentLibrary {
    name: String,
    factories: HashMap<String, Factory>,
    locale: HashMap<String, HashMap<String, Vec<u8>>>,
}

impl ComponentLibrary {
    /// An empty library with this name.
    pub fn new(name: impl Into<String>) -> Self {
        ComponentLibrary {
            name: name.into(),
            factories: HashMap::new(),
            locale: HashMap::new(),
        }
    }

    /// This library's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a factory for the component called `name`.
    pub fn with_component<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Component> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    /// Attach a language-specific data blob to a component.
    pub fn with_locale_data(
        mut self,
        component: impl Into<String>,
        language: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.locale
            .entry(component.into())
            .or_default()
            .insert(language.into(), data.into());
        self
    }

    /// Names of the components this library provides, in no particular
    /// order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for ComponentLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentLibrary")
            .field("name", &self.name)
            .field("components", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Loader over a set of in-memory libraries with a shared instance cache.
#[derive(Default)]
pub struct LibraryLoader {
    libraries: HashMap<String, ComponentLibrary>,
    cache: RwLock<HashMap<ComponentIdent, Arc<dyn Component>>>,
}

impl fmt::Debug for LibraryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryLoader")
            .field("libraries", &self.libraries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl LibraryLoader {
    /// A loader with no libraries.
    pub fn new() -> Self {
        LibraryLoader::default()
    }

    /// Register a library, replacing any previous one with the same name.
    pub fn add_library(&mut self, library: ComponentLibrary) {
        debug!(library = library.name(), "registering component library");
        self.libraries.insert(library.name().to_string(), library);
    }

    /// The registered libraries, in no particular order.
    pub fn libraries(&self) -> impl Iterator<Item = &ComponentLibrary> {
        self.libraries.values()
    }

    /// Drop the cached instance for an identity, if there is one.
    ///
    /// The instance itself goes away when the last outstanding handle drops;
    /// that is the moment its fragments see their teardown hooks.
    pub fn evict(&self, ident: &ComponentIdent) -> bool {
        self.cache
            .write()
            .expect("component cache poisoned")
            .remove(ident)
            .is_some()
    }

    fn instantiate(&self, ident: &ComponentIdent) -> Result<Arc<dyn Component>, ResolveError> {
        let library = self
            .libraries
            .get(ident.library())
            .ok_or_else(|| ResolveError::not_found(ident))?;
        let factory = library
            .factories
            .get(ident.name())
            .ok_or_else(|| ResolveError::not_found(ident))?;
        debug!(%ident, "instantiating component");
        Ok(factory())
    }
}

impl Loader for LibraryLoader {
    fn fetch(
        &self,
        ident: &ComponentIdent,
        _mapper: &dyn UrlMapper,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        if let Some(component) = self
            .cache
            .read()
            .expect("component cache poisoned")
            .get(ident)
        {
            return Ok(Arc::clone(component));
        }

        let fresh = self.instantiate(ident)?;
        let mut cache = self.cache.write().expect("component cache poisoned");
        // A racing fetch may have cached its instance first; keep whichever
        // landed and share it.
        Ok(Arc::clone(cache.entry(ident.clone()).or_insert(fresh)))
    }

    fn create(
        &self,
        ident: &ComponentIdent,
        _mapper: &dyn UrlMapper,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        self.instantiate(ident)
    }

    fn locale_data(&self, ident: &ComponentIdent, language: &str) -> Option<Vec<u8>> {
        self.libraries
            .get(ident.library())?
            .locale
            .get(ident.name())?
            .get(language)
            .cloned()
    }
}
