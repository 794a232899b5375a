//! URL-to-component mapping rules
//!
//! The second resolution tier: an ordered list of regular-expression rules
//! turning raw request paths into component identifiers. The first matching
//! rule wins. Capture groups of the pattern expand into the target before it
//! is read as an identifier, so one rule can fan a whole URL directory out
//! to a library (`^/reports/([^/.]+)$` mapped to `reports/$1`).

use regex::Regex;
use tracing::debug;

use crate::error::ResolveError;
use crate::ident::ComponentIdent;
use crate::service::UrlMapper;

#[derive(Debug, Clone)]
struct MapRule {
    pattern: Regex,
    target: String,
}

/// Ordered URL mapping table.
#[derive(Debug, Clone, Default)]
pub struct UrlMap {
    rules: Vec<MapRule>,
}

impl UrlMap {
    /// An empty table; every lookup reports not found.
    pub fn new() -> Self {
        UrlMap::default()
    }

    /// Append a rule mapping URLs matching `pattern` to `target`.
    ///
    /// The target may reference capture groups of the pattern (`$1`,
    /// `${name}`). An invalid pattern is rejected here, at configuration
    /// time, never during request handling.
    pub fn insert(
        &mut self,
        pattern: &str,
        target: impl Into<String>,
    ) -> Result<(), ResolveError> {
        let pattern = Regex::new(pattern)
            .map_err(|err| ResolveError::invalid(pattern, err.to_string()))?;
        self.rules.push(MapRule {
            pattern,
            target: target.into(),
        });
        Ok(())
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl UrlMapper for UrlMap {
    fn map(&self, url: &str) -> Result<ComponentIdent, ResolveError> {
        for rule in &self.rules {
            if let Some(captures) = rule.pattern.captures(url) {
                let mut target = String::new();
                captures.expand(&rule.target, &mut target);
                let ident = ComponentIdent::parse(&target);
                debug!(url, %ident, "mapped url to component");
                return Ok(ident);
            }
        }
        Err(ResolveError::not_found(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_matching_rule_wins() {
        let mut map = UrlMap::new();
        map.insert("^/special$", "extras/special")
            .expect("Should accept the pattern");
        map.insert("^/", "content/fallback")
            .expect("Should accept the pattern");

        let ident = map.map("/special").expect("Should map");
        assert_eq!(ident, ComponentIdent::new("extras", "special"));

        let ident = map.map("/anything-else").expect("Should map");
        assert_eq!(ident, ComponentIdent::new("content", "fallback"));
    }

    #[test]
    fn test_capture_groups_expand_into_the_target() {
        let mut map = UrlMap::new();
        map.insert("^/reports/([^/.]+)$", "reports/$1")
            .expect("Should accept the pattern");

        let ident = map.map("/reports/summary").expect("Should map");
        assert_eq!(ident, ComponentIdent::new("reports", "summary"));
    }

    #[test]
    fn test_named_capture_groups_work_too() {
        let mut map = UrlMap::new();
        map.insert("^/(?P<lib>[^/]+)/(?P<comp>[^/.]+)$", "${lib}/${comp}")
            .expect("Should accept the pattern");

        let ident = map.map("/content/styles").expect("Should map");
        assert_eq!(ident, ComponentIdent::new("content", "styles"));
    }

    #[test]
    fn test_unmatched_urls_are_not_found() {
        let map = UrlMap::new();
        let err = map.map("/nothing").expect_err("Should miss");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "component not found: /nothing");
    }

    #[test]
    fn test_invalid_patterns_are_rejected_at_insert() {
        let mut map = UrlMap::new();
        let err = map.insert("([", "broken").expect_err("Should reject");
        assert!(matches!(err, ResolveError::InvalidReference { .. }));
        assert!(map.is_empty());
    }

    #[test]
    fn test_rules_are_counted() {
        let mut map = UrlMap::new();
        assert_eq!(map.len(), 0);
        map.insert("^/a$", "lib/a").expect("Should accept");
        map.insert("^/b$", "lib/b").expect("Should accept");
        assert_eq!(map.len(), 2);
    }
}
