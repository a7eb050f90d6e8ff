//! Part-of-speech blacklist filter

use crate::filter::Filter;
use spotgate_core::SurfaceFormOccurrence;

/// Tag prefixes excluded when they make up the whole candidate
///
/// Penn Treebank style: adjectives, verbs, adverbs, determiners,
/// prepositions, pronouns, conjunctions, modals, numerals, wh-words,
/// particles, interjections, existential "there", "to".
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "jj", "vb", "rb", "dt", "pdt", "in", "prp", "cc", "md", "cd", "wdt", "wp", "wrb", "rp", "uh",
    "ex", "to", "pos",
];

/// Check whether a POS tag denotes an adjective (`JJ`, `JJR`, `JJS`, ...)
pub fn is_adjective_tag(tag: &str) -> bool {
    tag.starts_with(|c: char| c.eq_ignore_ascii_case(&'j'))
}

/// Drops candidates whose tag sequence is on a blacklist
///
/// Entries are tag sequences compared element-wise by case-insensitive
/// prefix, so `["jj"]` excludes a single `JJ`, `JJR` or `JJS` token.
/// Occurrences without complete POS information always pass.
#[derive(Debug, Clone)]
pub struct PosFilter {
    blacklist: Vec<Vec<String>>,
}

impl PosFilter {
    /// Create a filter from blacklisted tag sequences
    pub fn new(blacklist: Vec<Vec<String>>) -> Self {
        let blacklist = blacklist
            .into_iter()
            .filter(|sequence| !sequence.is_empty())
            .map(|sequence| sequence.into_iter().map(|t| t.to_lowercase()).collect())
            .collect();

        Self { blacklist }
    }

    /// Number of blacklisted sequences
    pub fn len(&self) -> usize {
        self.blacklist.len()
    }

    /// Whether the blacklist is empty
    pub fn is_empty(&self) -> bool {
        self.blacklist.is_empty()
    }

    fn is_blacklisted(&self, tags: &[String]) -> bool {
        self.blacklist.iter().any(|sequence| {
            sequence.len() == tags.len()
                && sequence
                    .iter()
                    .zip(tags)
                    .all(|(prefix, tag)| tag.starts_with(prefix.as_str()))
        })
    }
}

impl Default for PosFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_BLACKLIST
                .iter()
                .map(|tag| vec![tag.to_string()])
                .collect(),
        )
    }
}

impl Filter for PosFilter {
    fn applies(&self, occurrence: &SurfaceFormOccurrence) -> bool {
        let Some(tagged) = occurrence.context().as_tagged() else {
            return true;
        };

        let tokens = tagged.tagged_tokens(occurrence);
        if tokens.is_empty() {
            return true;
        }

        let tags: Option<Vec<String>> = tokens
            .iter()
            .map(|t| t.pos_tag().map(str::to_lowercase))
            .collect();

        match tags {
            Some(tags) => !self.is_blacklisted(&tags),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "pos"
    }
}
