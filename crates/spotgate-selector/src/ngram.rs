//! Cohesion-based n-gram classifier

use crate::classifier::{ensure_termsize, CandidateClassification, CandidateClassifier};
use crate::config::ClassifierParams;
use crate::statistics::OccurrenceDataProvider;
use async_trait::async_trait;
use spotgate_core::{Error, Result, SurfaceFormOccurrence, Termsize};
use std::sync::Arc;

/// Classifier identifier used in configuration
pub const NGRAM_COHESION_ID: &str = "ngram-cohesion";

/// Scores multi-token candidates by how strongly their tokens co-occur
///
/// Cohesion is the pointwise mutual information of the n-gram against its
/// tokens, `log2(P(ngram) / prod(P(token)))`, divided by the token count.
pub struct NGramCohesionClassifier {
    name: String,
    provider: Arc<dyn OccurrenceDataProvider>,
    params: ClassifierParams,
}

impl NGramCohesionClassifier {
    /// Create a new n-gram classifier
    pub fn new(provider: Arc<dyn OccurrenceDataProvider>, params: ClassifierParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            name: NGRAM_COHESION_ID.to_string(),
            provider,
            params,
        })
    }

    async fn count(&self, occurrence: &SurfaceFormOccurrence, key: &str, token: bool) -> Result<u64> {
        let lookup = if token {
            self.provider.token_count(key).await
        } else {
            self.provider.occurrence_count(key).await
        };

        lookup
            .map_err(|e| Error::classification(format!("lookup of '{}' failed: {}", key, e)))?
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                Error::classification(format!(
                    "no occurrence data for '{}' in {}",
                    key, occurrence
                ))
            })
    }
}

#[async_trait]
impl CandidateClassifier for NGramCohesionClassifier {
    async fn classify(&self, occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification> {
        ensure_termsize(self, occurrence)?;

        let surface_form = occurrence.surface_form();
        let total = self.provider.total_tokens() as f64;

        let ngram_count = self.count(occurrence, surface_form, false).await?;
        let mut log_p_tokens = 0.0;
        let mut n = 0usize;
        for token in surface_form.split_whitespace() {
            let count = self.count(occurrence, token, true).await?;
            log_p_tokens += (count as f64 / total).log2();
            n += 1;
        }

        let pmi = (ngram_count as f64 / total).log2() - log_p_tokens;
        let cohesion = pmi / n as f64;

        if ngram_count >= self.params.min_count && cohesion >= self.params.min_cohesion {
            Ok(CandidateClassification::term(cohesion))
        } else {
            Ok(CandidateClassification::other(cohesion))
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn termsize(&self) -> Termsize {
        Termsize::NGram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{InMemoryOccurrenceData, OccurrenceSnapshot};
    use spotgate_core::{Context, Text};
    use std::collections::HashMap;

    fn classifier(params: ClassifierParams) -> NGramCohesionClassifier {
        let snapshot = OccurrenceSnapshot {
            total_tokens: 1_000_000,
            occurrences: HashMap::from([
                ("New York City".to_string(), 300),
                ("of the".to_string(), 2_000),
            ]),
            tokens: HashMap::from([
                ("new".to_string(), 2_000),
                ("york".to_string(), 800),
                ("city".to_string(), 1_500),
                ("of".to_string(), 40_000),
                ("the".to_string(), 60_000),
            ]),
        };
        let provider = Arc::new(InMemoryOccurrenceData::from_snapshot(snapshot).unwrap());
        NGramCohesionClassifier::new(provider, params).unwrap()
    }

    fn occurrence(surface_form: &str) -> SurfaceFormOccurrence {
        let context: Context = Text::new(surface_form).into();
        SurfaceFormOccurrence::new(surface_form, 0, context)
    }

    #[tokio::test]
    async fn test_cohesive_ngram_is_term() {
        let classifier = classifier(ClassifierParams {
            min_cohesion: 5.0,
            ..Default::default()
        });

        let result = classifier.classify(&occurrence("New York City")).await.unwrap();
        assert!(result.is_term());
        assert!(result.confidence > 5.0);
    }

    #[tokio::test]
    async fn test_loose_ngram_is_other() {
        let classifier = classifier(ClassifierParams {
            min_cohesion: 5.0,
            ..Default::default()
        });

        let result = classifier.classify(&occurrence("of the")).await.unwrap();
        assert!(!result.is_term());
        assert!(result.confidence < 5.0);
    }

    #[tokio::test]
    async fn test_missing_token_data_fails() {
        let classifier = classifier(ClassifierParams::default());

        let result = classifier.classify(&occurrence("New Jersey")).await;
        assert!(matches!(result, Err(Error::Classification(_))));
    }

    #[tokio::test]
    async fn test_rejects_unigram() {
        let classifier = classifier(ClassifierParams::default());

        let result = classifier.classify(&occurrence("York")).await;
        assert!(matches!(result, Err(Error::Classification(_))));
    }
}
