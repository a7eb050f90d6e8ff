//! Co-occurrence based candidate selection
//!
//! The selector decides, for each surface form occurrence, whether it is
//! passed on to disambiguation. Every occurrence walks a fixed decision tree:
//!
//! 1. Occurrences without a tagged context are kept; nothing can be decided
//!    without POS information.
//! 2. Unigrams go through the POS blacklist (capitalized adjectives such as
//!    "Canadian" are exempt), then the pattern filter, then the unigram
//!    classifier.
//! 3. N-grams go straight to the n-gram classifier.
//!
//! A classifier failure drops only the occurrence being scored.

use crate::classifier::{CandidateClass, CandidateClassification};
use crate::config::SelectorConfig;
use crate::filter::Filter;
use crate::patterns::PatternFilter;
use crate::pos::{is_adjective_tag, PosFilter};
use crate::registry::ClassifierSet;
use crate::termsize::TermsizeFilter;
use futures::future::join_all;
use spotgate_core::{Error, Result, SurfaceFormOccurrence, TaggedText, Termsize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Why an occurrence was kept
#[derive(Debug, Clone, PartialEq)]
pub enum RetainReason {
    /// Context carries no POS information
    UntaggedContext,

    /// Blacklisted by POS, but a capitalized adjective
    UppercaseAdjective,

    /// Classified as a term
    Classified { termsize: Termsize, confidence: f64 },
}

/// Why an occurrence was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// Tag sequence is on the POS blacklist
    PosFilter,

    /// Surface form has an undesirable shape
    PatternFilter,

    /// Classified as other
    Classified { termsize: Termsize, confidence: f64 },

    /// The classifier could not score the occurrence
    ClassificationFailed { termsize: Termsize },
}

/// Outcome of the decision tree for one occurrence
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Passed on to disambiguation
    Retained(RetainReason),

    /// Removed from the candidate list
    Dropped(DropReason),
}

impl Decision {
    /// Check if the occurrence is kept
    pub fn is_retained(&self) -> bool {
        matches!(self, Self::Retained(_))
    }

    /// Label of the outcome for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Retained(_) => "retained",
            Self::Dropped(_) => "dropped",
        }
    }

    /// Label of the leaf that produced the decision
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Retained(RetainReason::UntaggedContext) => "untagged_context",
            Self::Retained(RetainReason::UppercaseAdjective) => "uppercase_adjective",
            Self::Dropped(DropReason::PosFilter) => "pos_filter",
            Self::Dropped(DropReason::PatternFilter) => "pattern_filter",
            Self::Retained(RetainReason::Classified { termsize, .. })
            | Self::Dropped(DropReason::Classified { termsize, .. }) => match termsize {
                Termsize::Unigram => "unigram_classifier",
                Termsize::NGram => "ngram_classifier",
            },
            Self::Dropped(DropReason::ClassificationFailed { termsize }) => match termsize {
                Termsize::Unigram => "unigram_classifier_error",
                Termsize::NGram => "ngram_classifier_error",
            },
        }
    }

    /// Classifier confidence, if a classifier produced the decision
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Retained(RetainReason::Classified { confidence, .. })
            | Self::Dropped(DropReason::Classified { confidence, .. }) => Some(*confidence),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence() {
            Some(confidence) => write!(
                f,
                "{} by {} (confidence: {:.3})",
                self.outcome(),
                self.reason(),
                confidence
            ),
            None => write!(f, "{} by {}", self.outcome(), self.reason()),
        }
    }
}

/// Candidate selector combining lexical filters with unigram and n-gram classifiers
///
/// Holds only shared, read-only state; cloning is cheap and clones can be
/// used from many tasks at once.
#[derive(Clone)]
pub struct CoOccurrenceSelector {
    unigram_filter: TermsizeFilter,
    pos_filter: Arc<dyn Filter>,
    pattern_filter: Arc<dyn Filter>,
    classifiers: ClassifierSet,
}

impl CoOccurrenceSelector {
    /// Create a selector from its collaborators
    pub fn new(
        classifiers: ClassifierSet,
        pos_filter: Arc<dyn Filter>,
        pattern_filter: Arc<dyn Filter>,
    ) -> Self {
        Self {
            unigram_filter: TermsizeFilter::unigram(),
            pos_filter,
            pattern_filter,
            classifiers,
        }
    }

    /// Create a selector with the built-in POS blacklist and patterns
    pub fn with_default_filters(classifiers: ClassifierSet) -> Result<Self> {
        Ok(Self::new(
            classifiers,
            Arc::new(PosFilter::default()),
            Arc::new(PatternFilter::with_defaults()?),
        ))
    }

    /// Provision statistics, classifiers and filters from configuration
    ///
    /// Any failure here is an initialization error; the selector must not
    /// be used without it succeeding.
    pub async fn from_config(config: &SelectorConfig) -> Result<Self> {
        let classifiers = ClassifierSet::from_config(config).await?;
        let pattern_filter = config
            .filters
            .pattern_filter()
            .map_err(|e| Error::initialization(e.to_string()))?;

        Ok(Self::new(
            classifiers,
            Arc::new(config.filters.pos_filter()),
            Arc::new(pattern_filter),
        ))
    }

    /// Keep the occurrences worth disambiguating, in input order
    pub async fn select(&self, occurrences: Vec<SurfaceFormOccurrence>) -> Vec<SurfaceFormOccurrence> {
        let total = occurrences.len();
        let mut selected = Vec::with_capacity(total);

        for occurrence in occurrences {
            if self.decide(&occurrence).await.is_retained() {
                selected.push(occurrence);
            }
        }

        debug!("Selected {}/{} candidates", selected.len(), total);
        selected
    }

    /// Like [`select`](Self::select), but scores all occurrences concurrently
    pub async fn select_concurrent(
        &self,
        occurrences: Vec<SurfaceFormOccurrence>,
    ) -> Vec<SurfaceFormOccurrence> {
        let total = occurrences.len();
        let selected: Vec<_> = self
            .select_with_decisions(occurrences)
            .await
            .into_iter()
            .filter_map(|(occurrence, decision)| decision.is_retained().then_some(occurrence))
            .collect();

        debug!("Selected {}/{} candidates", selected.len(), total);
        selected
    }

    /// Pair every occurrence with its decision, in input order
    pub async fn select_with_decisions(
        &self,
        occurrences: Vec<SurfaceFormOccurrence>,
    ) -> Vec<(SurfaceFormOccurrence, Decision)> {
        let decisions = join_all(occurrences.iter().map(|o| self.decide(o))).await;
        occurrences.into_iter().zip(decisions).collect()
    }

    /// Run the decision tree for a single occurrence
    pub async fn decide(&self, occurrence: &SurfaceFormOccurrence) -> Decision {
        let decision = self.evaluate(occurrence).await;

        metrics::counter!(
            "spotgate_selector_decisions_total",
            "outcome" => decision.outcome(),
            "reason" => decision.reason()
        )
        .increment(1);

        decision
    }

    async fn evaluate(&self, occurrence: &SurfaceFormOccurrence) -> Decision {
        let Some(tagged) = occurrence.context().as_tagged() else {
            warn!(
                "{} has no tagged context, cannot apply co-occurrence selection; keeping it",
                occurrence
            );
            return Decision::Retained(RetainReason::UntaggedContext);
        };

        if !self.unigram_filter.applies(occurrence) {
            return self.classify(Termsize::NGram, occurrence).await;
        }

        if !self.pos_filter.applies(occurrence) {
            if occurrence.starts_uppercase() && first_tag_is_adjective(tagged, occurrence) {
                debug!("Kept uppercase adjective despite POS filter: {}", occurrence);
                return Decision::Retained(RetainReason::UppercaseAdjective);
            }

            info!("Dropped by POS filter: {}", occurrence);
            return Decision::Dropped(DropReason::PosFilter);
        }

        if !self.pattern_filter.applies(occurrence) {
            info!("Dropped by pattern filter: {}", occurrence);
            return Decision::Dropped(DropReason::PatternFilter);
        }

        self.classify(Termsize::Unigram, occurrence).await
    }

    async fn classify(&self, termsize: Termsize, occurrence: &SurfaceFormOccurrence) -> Decision {
        let classifier = self.classifiers.for_termsize(termsize);

        match classifier.classify(occurrence).await {
            Ok(CandidateClassification {
                class: CandidateClass::Term,
                confidence,
            }) => {
                debug!(
                    "Kept by {} classifier (confidence: {:.3}): {}",
                    termsize, confidence, occurrence
                );
                Decision::Retained(RetainReason::Classified {
                    termsize,
                    confidence,
                })
            }
            Ok(CandidateClassification { confidence, .. }) => {
                info!(
                    "Dropped by {} classifier (confidence: {:.3}): {}",
                    termsize, confidence, occurrence
                );
                Decision::Dropped(DropReason::Classified {
                    termsize,
                    confidence,
                })
            }
            Err(e) => {
                error!("Failed to classify {} candidate {}: {}", termsize, occurrence, e);
                metrics::counter!("spotgate_classifier_errors_total", "termsize" => termsize.as_str())
                    .increment(1);
                Decision::Dropped(DropReason::ClassificationFailed { termsize })
            }
        }
    }
}

/// Only the first tagged token is consulted, even for spans the tagger split
fn first_tag_is_adjective(tagged: &TaggedText, occurrence: &SurfaceFormOccurrence) -> bool {
    tagged
        .tagged_tokens(occurrence)
        .first()
        .and_then(|token| token.pos_tag())
        .map(is_adjective_tag)
        .unwrap_or(false)
}
