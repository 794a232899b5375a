//! Site maps: TOML descriptions of a site's libraries and mappings
//!
//! A site map declares the component libraries a deployment provides (their
//! components, fragments and locale data) and the site's URL mapping rules.
//! Loading one yields a live [`LibraryLoader`] and [`UrlMap`], so references
//! can be resolved exactly the way a running page would resolve them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::component::{Component, Fragment, FragmentRegistry, Page};
use crate::ident::ComponentIdent;
use crate::library::{ComponentLibrary, LibraryLoader};
use crate::service::ResolveContext;
use crate::urlmap::UrlMap;

/// Errors that can occur when loading a site map
#[derive(Error, Debug)]
pub enum SiteMapError {
    #[error("Failed to read site map file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse site map TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid mapping pattern '{pattern}': {message}")]
    PatternError { pattern: String, message: String },
}

/// A loaded site map: loader and mapping table, ready for resolution.
#[derive(Debug)]
pub struct SiteMap {
    /// Optional name for the site
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Loader over the declared libraries
    pub loader: LibraryLoader,
    /// The site's URL mapping rules
    pub mapper: UrlMap,
}

/// TOML structure for deserializing site maps
#[derive(Deserialize)]
struct TomlSiteMap {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    libraries: Vec<TomlLibrary>,
    #[serde(default)]
    mappings: Vec<TomlMapping>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlLibrary {
    name: String,
    #[serde(default)]
    components: Vec<TomlComponent>,
}

#[derive(Deserialize)]
struct TomlComponent {
    name: String,
    #[serde(default)]
    fragments: Vec<String>,
    /// Language tag -> data payload
    #[serde(default)]
    data: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMapping {
    pattern: String,
    target: String,
}

/// Placeholder fragment for declarations in a site map.
#[derive(Debug)]
struct DeclaredFragment;

impl Component for DeclaredFragment {}
impl Fragment for DeclaredFragment {}

impl SiteMap {
    /// Load a site map from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SiteMapError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a site map from TOML text.
    pub fn from_str(content: &str) -> Result<Self, SiteMapError> {
        let parsed: TomlSiteMap = toml::from_str(content)?;

        let mut loader = LibraryLoader::new();
        for lib in parsed.libraries {
            let mut library = ComponentLibrary::new(lib.name.clone());
            for comp in lib.components {
                let ident = ComponentIdent::new(lib.name.clone(), comp.name.clone());

                // Equivalent instances of one declaration share one registry,
                // so teardown hooks fire once, when the library goes away.
                let mut registry = FragmentRegistry::new(ident.clone());
                for fragment in comp.fragments {
                    registry.register(fragment, Arc::new(DeclaredFragment));
                }
                let registry = Arc::new(registry);

                library = library.with_component(comp.name.clone(), move || {
                    Arc::new(Page::with_fragments(ident.clone(), Arc::clone(&registry)))
                });
                for (language, data) in comp.data {
                    library = library.with_locale_data(comp.name.clone(), language, data);
                }
            }
            loader.add_library(library);
        }

        let mut mapper = UrlMap::new();
        for mapping in parsed.mappings {
            mapper
                .insert(&mapping.pattern, mapping.target)
                .map_err(|err| SiteMapError::PatternError {
                    pattern: mapping.pattern,
                    message: err.to_string(),
                })?;
        }

        Ok(SiteMap {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            loader,
            mapper,
        })
    }

    /// Borrow the loader and mapper as one resolution context.
    pub fn context(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.loader, &self.mapper)
    }
}
