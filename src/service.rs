//! Contracts of the services resolution runs against
//!
//! The loader owns component instantiation and caching; the URL mapper owns
//! the site's mapping rules. Resolution borrows both for the duration of one
//! call through [`ResolveContext`] and never stores them.

use std::sync::Arc;

use crate::component::Component;
use crate::error::ResolveError;
use crate::ident::ComponentIdent;

/// Component loading service.
///
/// Implementations own the live component instances; callers only ever hold
/// shared handles. Identities the loader does not know fail with
/// [`ResolveError::NotFound`]; every other failure is fatal to the caller's
/// resolution.
pub trait Loader: Send + Sync {
    /// The component with this identity, instantiated on first use and
    /// answered from the instance cache afterwards.
    ///
    /// The mapper is the URL-mapping context of the requesting component,
    /// passed through for any further indirection the loader performs.
    fn fetch(
        &self,
        ident: &ComponentIdent,
        mapper: &dyn UrlMapper,
    ) -> Result<Arc<dyn Component>, ResolveError>;

    /// A fresh instance of the component, bypassing the cache.
    fn create(
        &self,
        ident: &ComponentIdent,
        mapper: &dyn UrlMapper,
    ) -> Result<Arc<dyn Component>, ResolveError>;

    /// Language-specific data recorded for a component.
    ///
    /// Absence is an ordinary miss, not an error; callers fall back to their
    /// compiled-in default data.
    fn locale_data(&self, ident: &ComponentIdent, language: &str) -> Option<Vec<u8>>;
}

/// URL-to-component mapping service.
///
/// The second resolution tier: turns a raw request path into a component
/// identity. An unmapped path is [`ResolveError::NotFound`].
pub trait UrlMapper: Send + Sync {
    /// Map a raw request path to a component identity.
    fn map(&self, url: &str) -> Result<ComponentIdent, ResolveError>;
}

/// The pair of borrowed services one resolution call runs against.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Component loading service.
    pub loader: &'a dyn Loader,
    /// URL-mapping service consulted by the fallback tier.
    pub mapper: &'a dyn UrlMapper,
}

impl<'a> ResolveContext<'a> {
    /// Bundle a loader and a mapper for a resolution call.
    pub fn new(loader: &'a dyn Loader, mapper: &'a dyn UrlMapper) -> Self {
        ResolveContext { loader, mapper }
    }
}
