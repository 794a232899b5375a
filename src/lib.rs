//! Heddle - component addressing and dispatch for template-page sites
//!
//! A *component* is a loadable unit of server-side logic compiled from a page
//! template and identified as `library/name`. Page components embed named
//! *fragments* (`library/name.fragment`) that render individual slices of the
//! page. This library provides the machinery that turns textual references
//! into live components: identifier decomposition, the two-tier resolution
//! protocol (direct load first, URL mapping as fallback), fragment registries
//! with teardown hooks, and per-language data lookup. Component ownership
//! stays with the [`Loader`]; mapping rules stay with the [`UrlMapper`];
//! resolution borrows both as services.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use heddle::{ComponentIdent, ComponentLibrary, LibraryLoader, Page, ResolveContext, UrlMap};
//!
//! let library = ComponentLibrary::new("reports").with_component("summary", || {
//!     Arc::new(Page::new(ComponentIdent::new("reports", "summary")))
//! });
//!
//! let mut loader = LibraryLoader::new();
//! loader.add_library(library);
//! let mapper = UrlMap::new();
//!
//! // A sibling reference defaults to the current page's library.
//! let page = Page::new(ComponentIdent::parse("reports/index"));
//! let ctx = ResolveContext::new(&loader, &mapper);
//! let component = page.resolve(ctx, "summary").expect("summary is registered");
//! assert!(component.fragments().is_some());
//! ```

pub mod component;
pub mod error;
pub mod ident;
pub mod library;
pub mod request;
pub mod service;
pub mod sitemap;
pub mod urlmap;

pub use component::{Component, Fragment, FragmentRegistry, Page, SharedFragments};
pub use error::ResolveError;
pub use ident::{ComponentIdent, FragmentIdent};
pub use library::{ComponentLibrary, LibraryLoader};
pub use request::RequestContext;
pub use service::{Loader, ResolveContext, UrlMapper};
pub use sitemap::{SiteMap, SiteMapError};
pub use urlmap::UrlMap;
