//! Configuration for selector provisioning

use crate::patterns::{PatternFilter, DEFAULT_FRAGMENTS, DEFAULT_PATTERNS};
use crate::pos::PosFilter;
use crate::statistics::OccurrenceSnapshot;
use serde::{Deserialize, Serialize};
use spotgate_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration for the co-occurrence based selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Classifier used for single-token candidates
    pub unigram_classifier: ClassifierSpec,

    /// Classifier used for multi-token candidates
    pub ngram_classifier: ClassifierSpec,

    /// Occurrence statistics backing store
    pub statistics: StatisticsConfig,

    /// Lexical filter settings
    #[serde(default)]
    pub filters: FilterConfig,
}

impl SelectorConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid selector configuration: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }
}

/// Named classifier implementation plus its parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSpec {
    /// Classifier identifier, e.g. `unigram-frequency`
    pub id: String,

    /// Classifier parameters
    #[serde(default)]
    pub params: ClassifierParams,
}

impl ClassifierSpec {
    /// Create a spec with default parameters
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: ClassifierParams::default(),
        }
    }
}

/// Thresholds shared by the co-occurrence classifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Minimum corpus count for a candidate to be a term
    #[serde(default = "default_min_count")]
    pub min_count: u64,

    /// Maximum relative corpus frequency of a unigram term
    #[serde(default = "default_max_relative_frequency")]
    pub max_relative_frequency: f64,

    /// Minimum per-token cohesion of an n-gram term
    #[serde(default = "default_min_cohesion")]
    pub min_cohesion: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
            max_relative_frequency: default_max_relative_frequency(),
            min_cohesion: default_min_cohesion(),
        }
    }
}

impl ClassifierParams {
    /// Validate thresholds
    pub fn validate(&self) -> Result<()> {
        if !(self.max_relative_frequency > 0.0 && self.max_relative_frequency <= 1.0) {
            return Err(Error::config(format!(
                "max_relative_frequency must be in (0, 1], got {}",
                self.max_relative_frequency
            )));
        }
        if !self.min_cohesion.is_finite() {
            return Err(Error::config("min_cohesion must be finite"));
        }
        Ok(())
    }
}

/// Occurrence statistics backing store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StatisticsConfig {
    /// Counts given inline
    Memory { snapshot: OccurrenceSnapshot },

    /// Counts loaded from a JSON or YAML snapshot file
    File { path: PathBuf },
}

/// Lexical filter settings; unset fields use the built-in lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Blacklisted POS tag sequences
    #[serde(default)]
    pub pos_blacklist: Option<Vec<Vec<String>>>,

    /// Undesirable surface shape regexes
    #[serde(default)]
    pub patterns: Option<Vec<String>>,

    /// Undesirable surface fragments
    #[serde(default)]
    pub fragments: Option<Vec<String>>,
}

impl FilterConfig {
    /// Build the POS blacklist filter
    pub fn pos_filter(&self) -> PosFilter {
        match &self.pos_blacklist {
            Some(blacklist) => PosFilter::new(blacklist.clone()),
            None => PosFilter::default(),
        }
    }

    /// Build the pattern filter
    pub fn pattern_filter(&self) -> Result<PatternFilter> {
        match (&self.patterns, &self.fragments) {
            (None, None) => PatternFilter::with_defaults(),
            (Some(patterns), None) => PatternFilter::new(patterns.as_slice(), DEFAULT_FRAGMENTS),
            (None, Some(fragments)) => PatternFilter::new(DEFAULT_PATTERNS, fragments.as_slice()),
            (Some(patterns), Some(fragments)) => {
                PatternFilter::new(patterns.as_slice(), fragments.as_slice())
            }
        }
    }
}

fn default_min_count() -> u64 {
    1
}

fn default_max_relative_frequency() -> f64 {
    0.001
}

fn default_min_cohesion() -> f64 {
    0.0
}
