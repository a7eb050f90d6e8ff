//! Surface pattern filter

use crate::filter::Filter;
use aho_corasick::AhoCorasick;
use regex::RegexSet;
use spotgate_core::{Error, Result, SurfaceFormOccurrence};

/// Undesirable surface shapes, matched against the whole surface form
pub const DEFAULT_PATTERNS: &[&str] = &[
    // punctuation and symbols only
    r"^[\p{P}\p{S}]+$",
    // numbers, dates, amounts
    r"^[\d\p{P}\p{S}\s]+$",
    // a single letter
    r"^\p{L}$",
    // one or two lowercase letters
    r"^\p{Ll}{1,2}$",
    // lowercase word with trailing punctuation
    r"^\p{Ll}+[\p{P}\p{S}]+$",
];

/// Fragments that disqualify a surface form wherever they occur
pub const DEFAULT_FRAGMENTS: &[&str] = &["http", "www.", "://", "@", ".com", ".org", ".html"];

/// Drops candidates with undesirable lexical shapes
///
/// Uses a `RegexSet` for anchored shape patterns and Aho-Corasick for
/// case-insensitive fragments.
pub struct PatternFilter {
    patterns: RegexSet,
    fragments: Option<AhoCorasick>,
}

impl PatternFilter {
    /// Create a new pattern filter
    pub fn new<P, F>(patterns: &[P], fragments: &[F]) -> Result<Self>
    where
        P: AsRef<str>,
        F: AsRef<[u8]>,
    {
        let patterns = RegexSet::new(patterns)
            .map_err(|e| Error::config(format!("Failed to build pattern filter: {}", e)))?;

        let fragments = if fragments.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(fragments)
                .map_err(|e| Error::config(format!("Failed to build fragment matcher: {}", e)))?;
            Some(ac)
        };

        Ok(Self { patterns, fragments })
    }

    /// Create a filter with the built-in patterns and fragments
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_PATTERNS, DEFAULT_FRAGMENTS)
    }

    /// Indices of the shape patterns matching a surface form
    pub fn matching_patterns(&self, surface_form: &str) -> Vec<usize> {
        self.patterns.matches(surface_form).into_iter().collect()
    }
}

impl Filter for PatternFilter {
    fn applies(&self, occurrence: &SurfaceFormOccurrence) -> bool {
        let surface_form = occurrence.surface_form();

        if self.patterns.is_match(surface_form) {
            return false;
        }

        match &self.fragments {
            Some(ac) => !ac.is_match(surface_form),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotgate_core::{Context, Text};

    fn occurrence(surface_form: &str) -> SurfaceFormOccurrence {
        let context: Context = Text::new(surface_form).into();
        SurfaceFormOccurrence::new(surface_form, 0, context)
    }

    #[test]
    fn test_default_patterns() {
        let filter = PatternFilter::with_defaults().unwrap();

        assert!(!filter.applies(&occurrence("--")));
        assert!(!filter.applies(&occurrence("1999")));
        assert!(!filter.applies(&occurrence("3.5%")));
        assert!(!filter.applies(&occurrence("x")));
        assert!(!filter.applies(&occurrence("of")));
        assert!(!filter.applies(&occurrence("said,")));
        assert!(!filter.applies(&occurrence("WWW.example.net")));
        assert!(!filter.applies(&occurrence("me@example")));

        assert!(filter.applies(&occurrence("Berlin")));
        assert!(filter.applies(&occurrence("UN")));
        assert!(filter.applies(&occurrence("physics")));
        assert!(filter.applies(&occurrence("R2-D2")));
    }

    #[test]
    fn test_matching_patterns() {
        let filter = PatternFilter::with_defaults().unwrap();
        assert_eq!(filter.matching_patterns("!!"), vec![0, 1]);
        assert!(filter.matching_patterns("Berlin").is_empty());
    }

    #[test]
    fn test_custom_patterns_without_fragments() {
        let filter = PatternFilter::new(&["^foo$"], &[] as &[&str]).unwrap();
        assert!(!filter.applies(&occurrence("foo")));
        assert!(filter.applies(&occurrence("foobar")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternFilter::new(&["(unclosed"], &[] as &[&str]);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
