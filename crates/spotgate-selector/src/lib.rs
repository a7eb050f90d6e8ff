//! Spotgate Selector
//!
//! Candidate spot selection for entity linking: decides which surface form
//! occurrences are worth passing on to disambiguation.
//!
//! The selector combines two kinds of collaborators:
//! - Filters: pure lexical predicates (term size, POS blacklist, surface patterns)
//! - Classifiers: statistical scorers for unigram and n-gram candidates, backed
//!   by a shared occurrence statistics provider
//!
//! Classifiers and statistics are provisioned once from configuration and
//! shared read-only afterwards.

pub mod baseline;
pub mod classifier;
pub mod config;
pub mod filter;
pub mod ngram;
pub mod patterns;
pub mod pos;
pub mod registry;
pub mod selector;
pub mod statistics;
pub mod termsize;
pub mod unigram;

pub use baseline::ConstantClassifier;
pub use classifier::{CandidateClass, CandidateClassification, CandidateClassifier};
pub use config::{ClassifierParams, ClassifierSpec, FilterConfig, SelectorConfig, StatisticsConfig};
pub use filter::Filter;
pub use ngram::NGramCohesionClassifier;
pub use patterns::PatternFilter;
pub use pos::PosFilter;
pub use registry::{build_classifier, open_statistics, ClassifierSet};
pub use selector::{CoOccurrenceSelector, Decision, DropReason, RetainReason};
pub use statistics::{InMemoryOccurrenceData, OccurrenceDataProvider, OccurrenceSnapshot};
pub use termsize::TermsizeFilter;
pub use unigram::UnigramFrequencyClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{CandidateClass, CandidateClassification, CandidateClassifier};
    pub use crate::config::SelectorConfig;
    pub use crate::filter::Filter;
    pub use crate::registry::ClassifierSet;
    pub use crate::selector::{CoOccurrenceSelector, Decision};
    pub use spotgate_core::prelude::*;
}
