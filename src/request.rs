//! Request facade for content negotiation
//!
//! Component code only ever needs one thing from the HTTP layer: the
//! negotiated language of the current request. Everything else stays behind
//! the dispatcher, so this facade stays deliberately small.

/// The slice of an HTTP request visible to component resolution.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    language: Option<String>,
}

impl RequestContext {
    /// A request with no negotiated language.
    pub fn new() -> Self {
        RequestContext::default()
    }

    /// A request carrying a negotiated language tag.
    ///
    /// An empty tag means no language was negotiated.
    pub fn with_language(tag: impl Into<String>) -> Self {
        let mut request = RequestContext::new();
        request.set_language(tag);
        request
    }

    /// The negotiated language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Replace the negotiated language; an empty tag clears it.
    pub fn set_language(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        self.language = (!tag.is_empty()).then_some(tag);
    }
}
