//! Structured component and fragment identifiers
//!
//! A textual reference has the canonical form `library/component.fragment`,
//! where the `library/` prefix and the `.fragment` suffix are both optional.
//! Decomposition never fails: missing parts come back empty and are filled in
//! from the referencing component's own identity during resolution.

use std::fmt;

/// Identity of a component: the library providing it plus its name.
///
/// Parsing splits a raw reference once on the first `/`. Either part may be
/// empty; empty parts are placeholders that [`qualify`](Self::qualify) fills
/// from a referencing component's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentIdent {
    library: String,
    name: String,
}

impl ComponentIdent {
    /// Create an identifier from explicit parts.
    pub fn new(library: impl Into<String>, name: impl Into<String>) -> Self {
        ComponentIdent {
            library: library.into(),
            name: name.into(),
        }
    }

    /// Decompose a raw reference into library and component name.
    ///
    /// Without a `/` the whole input is the component name and the library
    /// is left empty. Only the first `/` separates; later ones belong to the
    /// name.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('/') {
            Some((library, name)) => ComponentIdent::new(library, name),
            None => ComponentIdent::new("", raw),
        }
    }

    /// The library part, possibly empty.
    pub fn library(&self) -> &str {
        &self.library
    }

    /// The component name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fill an empty library from the referencing component's identity.
    pub fn qualify(mut self, current: &ComponentIdent) -> Self {
        if self.library.is_empty() {
            self.library = current.library.clone();
        }
        self
    }
}

impl fmt::Display for ComponentIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.library.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.library, self.name)
        }
    }
}

impl From<&str> for ComponentIdent {
    fn from(raw: &str) -> Self {
        ComponentIdent::parse(raw)
    }
}

/// Identity of a fragment inside a parent component.
///
/// Parsing first splits off the library, then splits the remainder once on
/// the first `.`: `"a/b.c"` is fragment `c` of component `b` in library `a`.
/// The library part is never re-examined, so a `.` inside it stays put. An
/// empty fragment part means the reference names the component itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FragmentIdent {
    component: ComponentIdent,
    fragment: String,
}

impl FragmentIdent {
    /// Create an identifier from explicit parts.
    pub fn new(component: ComponentIdent, fragment: impl Into<String>) -> Self {
        FragmentIdent {
            component,
            fragment: fragment.into(),
        }
    }

    /// Decompose a raw reference into library, component name and fragment.
    pub fn parse(raw: &str) -> Self {
        let ident = ComponentIdent::parse(raw);
        match ident.name.split_once('.') {
            Some((name, fragment)) => FragmentIdent {
                component: ComponentIdent::new(ident.library, name),
                fragment: fragment.to_string(),
            },
            None => FragmentIdent {
                component: ident,
                fragment: String::new(),
            },
        }
    }

    /// The component part of the identity.
    pub fn component(&self) -> &ComponentIdent {
        &self.component
    }

    /// The fragment name, empty when the reference names a whole component.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Fill empty library and component parts from the referencing
    /// component's identity.
    ///
    /// This is what lets a component reference its own fragments by short
    /// name and sibling components without naming the library.
    pub fn qualify(mut self, current: &ComponentIdent) -> Self {
        if self.component.library.is_empty() {
            self.component.library = current.library.clone();
        }
        if self.component.name.is_empty() {
            self.component.name = current.name.clone();
        }
        self
    }
}

impl fmt::Display for FragmentIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component)?;
        if !self.fragment.is_empty() {
            write!(f, ".{}", self.fragment)?;
        }
        Ok(())
    }
}

impl From<&str> for FragmentIdent {
    fn from(raw: &str) -> Self {
        FragmentIdent::parse(raw)
    }
}
