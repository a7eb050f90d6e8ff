//! Frequency-based unigram classifier

use crate::classifier::{ensure_termsize, CandidateClassification, CandidateClassifier};
use crate::config::ClassifierParams;
use crate::statistics::OccurrenceDataProvider;
use async_trait::async_trait;
use spotgate_core::{Error, Result, SurfaceFormOccurrence, Termsize};
use std::sync::Arc;

/// Classifier identifier used in configuration
pub const UNIGRAM_FREQUENCY_ID: &str = "unigram-frequency";

/// Scores single-token candidates by corpus frequency
///
/// A unigram is a term when it has been seen at least `min_count` times but
/// is not so frequent that it is a common word (`max_relative_frequency`).
/// Confidence is the log10 of the corpus count.
pub struct UnigramFrequencyClassifier {
    name: String,
    provider: Arc<dyn OccurrenceDataProvider>,
    params: ClassifierParams,
}

impl UnigramFrequencyClassifier {
    /// Create a new unigram classifier
    pub fn new(provider: Arc<dyn OccurrenceDataProvider>, params: ClassifierParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            name: UNIGRAM_FREQUENCY_ID.to_string(),
            provider,
            params,
        })
    }
}

#[async_trait]
impl CandidateClassifier for UnigramFrequencyClassifier {
    async fn classify(&self, occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification> {
        ensure_termsize(self, occurrence)?;

        let surface_form = occurrence.surface_form();
        let count = self
            .provider
            .occurrence_count(surface_form)
            .await
            .map_err(|e| Error::classification(format!("lookup of {} failed: {}", occurrence, e)))?
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                Error::classification(format!("no occurrence data for {}", occurrence))
            })?;

        let relative_frequency = count as f64 / self.provider.total_tokens() as f64;
        let confidence = (count as f64).log10();

        if count >= self.params.min_count
            && relative_frequency <= self.params.max_relative_frequency
        {
            Ok(CandidateClassification::term(confidence))
        } else {
            Ok(CandidateClassification::other(confidence))
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn termsize(&self) -> Termsize {
        Termsize::Unigram
    }
}
