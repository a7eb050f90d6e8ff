//! Classifier provisioning from configuration

use crate::baseline::{ConstantClassifier, ALWAYS_TERM_ID};
use crate::classifier::CandidateClassifier;
use crate::config::{ClassifierSpec, SelectorConfig, StatisticsConfig};
use crate::ngram::{NGramCohesionClassifier, NGRAM_COHESION_ID};
use crate::statistics::{InMemoryOccurrenceData, OccurrenceDataProvider};
use crate::unigram::{UnigramFrequencyClassifier, UNIGRAM_FREQUENCY_ID};
use spotgate_core::{Error, Result, Termsize};
use std::sync::Arc;
use tracing::info;

/// The unigram and n-gram classifiers, sharing one statistics provider
///
/// Built once at startup; cloning shares the same instances.
#[derive(Clone)]
pub struct ClassifierSet {
    unigram: Arc<dyn CandidateClassifier>,
    ngram: Arc<dyn CandidateClassifier>,
    statistics: Option<Arc<dyn OccurrenceDataProvider>>,
}

impl ClassifierSet {
    /// Assemble a set from already constructed classifiers
    ///
    /// Fails if either classifier serves the wrong term size.
    pub fn new(
        unigram: Arc<dyn CandidateClassifier>,
        ngram: Arc<dyn CandidateClassifier>,
    ) -> Result<Self> {
        expect_termsize(unigram.as_ref(), Termsize::Unigram)?;
        expect_termsize(ngram.as_ref(), Termsize::NGram)?;

        Ok(Self {
            unigram,
            ngram,
            statistics: None,
        })
    }

    /// Open the statistics provider and build both classifiers from configuration
    pub async fn from_config(config: &SelectorConfig) -> Result<Self> {
        info!("Initializing occurrence data provider");
        let statistics = open_statistics(&config.statistics).await?;
        info!("Occurrence data provider '{}' ready", statistics.name());

        Self::from_specs(
            &config.unigram_classifier,
            &config.ngram_classifier,
            statistics,
        )
    }

    /// Build both classifiers against a shared statistics provider
    pub fn from_specs(
        unigram: &ClassifierSpec,
        ngram: &ClassifierSpec,
        statistics: Arc<dyn OccurrenceDataProvider>,
    ) -> Result<Self> {
        info!("Initializing candidate classifiers");

        let unigram = build_classifier(unigram, Termsize::Unigram, Arc::clone(&statistics))?;
        let ngram = build_classifier(ngram, Termsize::NGram, Arc::clone(&statistics))?;

        info!(
            "Candidate classifiers ready (unigram: {}, ngram: {})",
            unigram.name(),
            ngram.name()
        );

        Ok(Self {
            unigram,
            ngram,
            statistics: Some(statistics),
        })
    }

    /// Get the unigram classifier
    pub fn unigram(&self) -> &Arc<dyn CandidateClassifier> {
        &self.unigram
    }

    /// Get the n-gram classifier
    pub fn ngram(&self) -> &Arc<dyn CandidateClassifier> {
        &self.ngram
    }

    /// Get the classifier for a term size
    pub fn for_termsize(&self, termsize: Termsize) -> &Arc<dyn CandidateClassifier> {
        match termsize {
            Termsize::Unigram => &self.unigram,
            Termsize::NGram => &self.ngram,
        }
    }

    /// Get the shared statistics provider, if the set was built from configuration
    pub fn statistics(&self) -> Option<&Arc<dyn OccurrenceDataProvider>> {
        self.statistics.as_ref()
    }
}

/// Open the occurrence statistics backing store
pub async fn open_statistics(config: &StatisticsConfig) -> Result<Arc<dyn OccurrenceDataProvider>> {
    let provider = match config {
        StatisticsConfig::Memory { snapshot } => {
            InMemoryOccurrenceData::from_snapshot(snapshot.clone())
        }
        StatisticsConfig::File { path } => InMemoryOccurrenceData::from_file(path).await,
    }
    .map_err(into_initialization)?;

    Ok(Arc::new(provider))
}

/// Build a classifier by identifier
///
/// Known identifiers: `unigram-frequency` (unigram only), `ngram-cohesion`
/// (n-gram only), `always-term` (either).
pub fn build_classifier(
    spec: &ClassifierSpec,
    termsize: Termsize,
    statistics: Arc<dyn OccurrenceDataProvider>,
) -> Result<Arc<dyn CandidateClassifier>> {
    let classifier: Arc<dyn CandidateClassifier> = match spec.id.as_str() {
        UNIGRAM_FREQUENCY_ID => Arc::new(
            UnigramFrequencyClassifier::new(statistics, spec.params.clone())
                .map_err(into_initialization)?,
        ),
        NGRAM_COHESION_ID => Arc::new(
            NGramCohesionClassifier::new(statistics, spec.params.clone())
                .map_err(into_initialization)?,
        ),
        ALWAYS_TERM_ID => Arc::new(ConstantClassifier::new(termsize)),
        other => {
            return Err(Error::initialization(format!(
                "Unknown {} classifier '{}'",
                termsize, other
            )))
        }
    };

    expect_termsize(classifier.as_ref(), termsize)?;
    Ok(classifier)
}

fn expect_termsize(classifier: &dyn CandidateClassifier, expected: Termsize) -> Result<()> {
    if classifier.termsize() != expected {
        return Err(Error::initialization(format!(
            "Classifier '{}' scores {} candidates but is configured for {} candidates",
            classifier.name(),
            classifier.termsize(),
            expected
        )));
    }
    Ok(())
}

fn into_initialization(error: Error) -> Error {
    match error {
        Error::Initialization(_) => error,
        other => Error::initialization(other.to_string()),
    }
}
