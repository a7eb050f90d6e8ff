//! Candidate classifier trait and common types

use async_trait::async_trait;
use spotgate_core::{Error, Result, SurfaceFormOccurrence, Termsize};
use std::fmt;

/// Trait for candidate classifiers
///
/// A classifier serves exactly one [`Termsize`] class and must not be asked
/// to score an occurrence of the other class.
#[async_trait]
pub trait CandidateClassifier: Send + Sync {
    /// Classify the given occurrence
    async fn classify(&self, occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the term size class this classifier scores
    fn termsize(&self) -> Termsize;
}

/// Binary verdict of a candidate classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateClass {
    /// Worth passing on to disambiguation
    Term,
    /// Noise
    Other,
}

impl CandidateClass {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Term => "term",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CandidateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of candidate classification
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateClassification {
    /// Candidate class
    pub class: CandidateClass,

    /// Classifier confidence; unbounded, only used for diagnostics
    pub confidence: f64,
}

impl CandidateClassification {
    /// Create a new classification
    pub fn new(class: CandidateClass, confidence: f64) -> Self {
        Self { class, confidence }
    }

    /// Create a `term` classification
    pub fn term(confidence: f64) -> Self {
        Self::new(CandidateClass::Term, confidence)
    }

    /// Create an `other` classification
    pub fn other(confidence: f64) -> Self {
        Self::new(CandidateClass::Other, confidence)
    }

    /// Check if the candidate was classified as a term
    pub fn is_term(&self) -> bool {
        self.class == CandidateClass::Term
    }
}

/// Reject occurrences outside the classifier's term size class
pub(crate) fn ensure_termsize(
    classifier: &dyn CandidateClassifier,
    occurrence: &SurfaceFormOccurrence,
) -> Result<()> {
    let actual = occurrence.termsize();
    if actual != classifier.termsize() {
        return Err(Error::classification(format!(
            "{} classifier '{}' cannot score {} candidate {}",
            classifier.termsize(),
            classifier.name(),
            actual,
            occurrence
        )));
    }
    Ok(())
}
