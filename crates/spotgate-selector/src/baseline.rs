//! Pass-through baseline classifier

use crate::classifier::{ensure_termsize, CandidateClassification, CandidateClassifier};
use async_trait::async_trait;
use spotgate_core::{Result, SurfaceFormOccurrence, Termsize};

/// Classifier identifier used in configuration
pub const ALWAYS_TERM_ID: &str = "always-term";

/// Classifies every candidate of its term size as a term
pub struct ConstantClassifier {
    name: String,
    termsize: Termsize,
}

impl ConstantClassifier {
    /// Create a baseline classifier for the given term size
    pub fn new(termsize: Termsize) -> Self {
        Self {
            name: format!("{}-{}", ALWAYS_TERM_ID, termsize),
            termsize,
        }
    }
}

#[async_trait]
impl CandidateClassifier for ConstantClassifier {
    async fn classify(&self, occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification> {
        ensure_termsize(self, occurrence)?;
        Ok(CandidateClassification::term(1.0))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn termsize(&self) -> Termsize {
        self.termsize
    }
}
