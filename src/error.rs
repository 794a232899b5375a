//! Error types for component resolution

use std::fmt::Display;

use thiserror::Error;

/// Errors produced while resolving component references
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The referenced component, fragment or mapping entry does not exist.
    ///
    /// This is the only recoverable kind: free-text resolution falls back to
    /// URL mapping when the direct tier reports it. Every other kind aborts
    /// resolution unchanged.
    #[error("component not found: {ident}")]
    NotFound { ident: String },

    /// A reference or mapping rule a collaborator rejected as malformed.
    #[error("invalid reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// The library backing a component could not be loaded.
    #[error("library '{library}' failed to load: {message}")]
    LibraryLoad { library: String, message: String },

    /// I/O failure in the loader's backing store.
    #[error("component store error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Create a `NotFound` error carrying the printed identity.
    pub fn not_found(ident: impl Display) -> Self {
        ResolveError::NotFound {
            ident: ident.to_string(),
        }
    }

    /// Create an `InvalidReference` error.
    pub fn invalid(reference: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::InvalidReference {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a `LibraryLoad` error.
    pub fn library_load(library: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::LibraryLoad {
            library: library.into(),
            message: message.into(),
        }
    }

    /// True for the one error kind that triggers the URL-mapping fallback.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}
