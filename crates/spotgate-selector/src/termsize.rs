//! Term size filter

use crate::filter::Filter;
use spotgate_core::{SurfaceFormOccurrence, Termsize};

/// Passes occurrences of one term size class
#[derive(Debug, Clone, Copy)]
pub struct TermsizeFilter {
    termsize: Termsize,
}

impl TermsizeFilter {
    /// Create a filter for the given term size
    pub fn new(termsize: Termsize) -> Self {
        Self { termsize }
    }

    /// Filter passing single-token candidates
    pub fn unigram() -> Self {
        Self::new(Termsize::Unigram)
    }

    /// Filter passing multi-token candidates
    pub fn ngram() -> Self {
        Self::new(Termsize::NGram)
    }
}

impl Filter for TermsizeFilter {
    fn applies(&self, occurrence: &SurfaceFormOccurrence) -> bool {
        Termsize::of(occurrence) == self.termsize
    }

    fn name(&self) -> &str {
        match self.termsize {
            Termsize::Unigram => "termsize-unigram",
            Termsize::NGram => "termsize-ngram",
        }
    }
}
