//! Page components and the reference resolution protocol

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::component::{Component, Fragment, FragmentRegistry};
use crate::error::ResolveError;
use crate::ident::{ComponentIdent, FragmentIdent};
use crate::request::RequestContext;
use crate::service::ResolveContext;

/// A page-style component: an identity plus its embedded fragments.
///
/// `Page` is what generated page types wrap. It carries the resolution entry
/// points: free-text references run the full two-tier protocol through
/// [`resolve`](Self::resolve), structured identifiers load directly through
/// [`fetch`](Self::fetch) and [`create`](Self::create).
#[derive(Debug)]
pub struct Page {
    ident: ComponentIdent,
    fragments: Arc<FragmentRegistry>,
}

impl Page {
    /// A page with no fragments.
    pub fn new(ident: ComponentIdent) -> Self {
        let fragments = Arc::new(FragmentRegistry::new(ident.clone()));
        Page { ident, fragments }
    }

    /// A page owning, or sharing, a prepared fragment registry.
    pub fn with_fragments(ident: ComponentIdent, fragments: Arc<FragmentRegistry>) -> Self {
        Page { ident, fragments }
    }

    /// This page's identity.
    pub fn ident(&self) -> &ComponentIdent {
        &self.ident
    }

    /// Resolve a free-form textual reference to a component or fragment.
    ///
    /// The reference may be a fragment of this page (`.header`), a sibling
    /// component (`footer`), a fully qualified identifier
    /// (`reports/summary.header`) or a raw URL. Resolution applies, in order:
    ///
    /// 1. decompose the reference; empty library and component parts default
    ///    to this page's own identity;
    /// 2. load the named component through the loader;
    /// 3. if the reference names a fragment, look it up on the loaded
    ///    component — a component without fragments, or without that name,
    ///    counts as not found;
    /// 4. only when one of the previous steps reported not found: map the
    ///    original, undecomposed reference through the URL mapper and load
    ///    whatever identity it yields. Failures of this tier propagate
    ///    unchanged, so an unmapped URL surfaces the mapper's own error.
    ///
    /// Any failure other than [`ResolveError::NotFound`] aborts immediately
    /// without consulting the mapper.
    pub fn resolve(
        &self,
        ctx: ResolveContext<'_>,
        reference: &str,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        let ident = FragmentIdent::parse(reference).qualify(&self.ident);
        debug!(page = %self.ident, reference, target = %ident, "resolving reference");

        match self.resolve_direct(ctx, &ident) {
            Ok(component) => Ok(component),
            Err(err) if err.is_not_found() => {
                debug!(reference, "direct lookup found nothing, consulting url mapping");
                let mapped = ctx.mapper.map(reference)?;
                ctx.loader.fetch(&mapped, ctx.mapper)
            }
            Err(err) => Err(err),
        }
    }

    /// Direct tier: loader fetch plus fragment lookup, no fallback.
    fn resolve_direct(
        &self,
        ctx: ResolveContext<'_>,
        ident: &FragmentIdent,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        let component = ctx.loader.fetch(ident.component(), ctx.mapper)?;
        if ident.fragment().is_empty() {
            return Ok(component);
        }
        let fragments = component
            .fragments()
            .ok_or_else(|| ResolveError::not_found(ident))?;
        let fragment: Arc<dyn Component> = fragments.lookup(ident.fragment())?;
        Ok(fragment)
    }

    /// Resolve a structured identifier, defaulting an empty library to this
    /// page's own.
    ///
    /// No fallback: callers holding an identifier do not want mapping rules
    /// involved, so an unknown identity is reported as is.
    pub fn fetch(
        &self,
        ctx: ResolveContext<'_>,
        ident: &ComponentIdent,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        let ident = ident.clone().qualify(&self.ident);
        ctx.loader.fetch(&ident, ctx.mapper)
    }

    /// Like [`fetch`](Self::fetch), but always instantiates a fresh,
    /// uncached instance.
    pub fn create(
        &self,
        ctx: ResolveContext<'_>,
        ident: &ComponentIdent,
    ) -> Result<Arc<dyn Component>, ResolveError> {
        let ident = ident.clone().qualify(&self.ident);
        debug!(page = %self.ident, target = %ident, "creating fresh component instance");
        ctx.loader.create(&ident, ctx.mapper)
    }

    /// A fragment of this page, or `NotFound` carrying the qualified
    /// fragment identity.
    pub fn fragment(&self, name: &str) -> Result<Arc<dyn Fragment>, ResolveError> {
        self.fragments.lookup(name)
    }

    /// Language-specific data for this page, or the caller's default.
    ///
    /// A request without a negotiated language never reaches the loader;
    /// absence of data for the negotiated tag is a miss, not an error.
    pub fn locale_data<'d>(
        &self,
        ctx: ResolveContext<'_>,
        request: &RequestContext,
        default: &'d [u8],
    ) -> Cow<'d, [u8]> {
        if let Some(language) = request.language() {
            if let Some(data) = ctx.loader.locale_data(&self.ident, language) {
                return Cow::Owned(data);
            }
        }
        Cow::Borrowed(default)
    }
}

impl Component for Page {
    fn fragments(&self) -> Option<&FragmentRegistry> {
        Some(&self.fragments)
    }
}
