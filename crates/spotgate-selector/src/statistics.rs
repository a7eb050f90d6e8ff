//! Occurrence statistics used by the co-occurrence classifiers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spotgate_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Source of corpus occurrence counts
///
/// Shared read-only between classifiers for the lifetime of the process.
#[async_trait]
pub trait OccurrenceDataProvider: Send + Sync {
    /// Corpus count of a surface form or n-gram, `None` if unknown
    async fn occurrence_count(&self, surface_form: &str) -> Result<Option<u64>>;

    /// Corpus count of a single token, `None` if unknown
    async fn token_count(&self, token: &str) -> Result<Option<u64>>;

    /// Total number of tokens in the corpus
    fn total_tokens(&self) -> u64;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Serialized occurrence counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccurrenceSnapshot {
    /// Total number of tokens in the corpus
    pub total_tokens: u64,

    /// Counts of surface forms and n-grams
    #[serde(default)]
    pub occurrences: HashMap<String, u64>,

    /// Counts of single tokens
    #[serde(default)]
    pub tokens: HashMap<String, u64>,
}

impl OccurrenceSnapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid statistics snapshot: {}", e)))
    }
}

/// In-memory occurrence statistics with case-insensitive lookups
#[derive(Debug, Clone)]
pub struct InMemoryOccurrenceData {
    total_tokens: u64,
    occurrences: HashMap<String, u64>,
    tokens: HashMap<String, u64>,
}

impl InMemoryOccurrenceData {
    /// Build the provider from a snapshot
    pub fn from_snapshot(snapshot: OccurrenceSnapshot) -> Result<Self> {
        if snapshot.total_tokens == 0 {
            return Err(Error::initialization(
                "occurrence statistics report an empty corpus (total_tokens = 0)",
            ));
        }

        Ok(Self {
            total_tokens: snapshot.total_tokens,
            occurrences: normalize(snapshot.occurrences),
            tokens: normalize(snapshot.tokens),
        })
    }

    /// Load a snapshot file; `.yaml`/`.yml` files are read as YAML, anything else as JSON
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::initialization(format!(
                "Failed to read occurrence statistics {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let snapshot = if is_yaml {
            OccurrenceSnapshot::from_yaml(&content)
        } else {
            OccurrenceSnapshot::from_json(&content)
        }
        .map_err(|e| Error::initialization(format!("{}: {}", path.display(), e)))?;

        let data = Self::from_snapshot(snapshot)?;
        info!(
            "Loaded occurrence statistics from {} ({} surface forms, {} tokens)",
            path.display(),
            data.occurrences.len(),
            data.tokens.len()
        );

        Ok(data)
    }
}

#[async_trait]
impl OccurrenceDataProvider for InMemoryOccurrenceData {
    async fn occurrence_count(&self, surface_form: &str) -> Result<Option<u64>> {
        Ok(self.occurrences.get(&surface_form.to_lowercase()).copied())
    }

    async fn token_count(&self, token: &str) -> Result<Option<u64>> {
        Ok(self.tokens.get(&token.to_lowercase()).copied())
    }

    fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

fn normalize(counts: HashMap<String, u64>) -> HashMap<String, u64> {
    let mut normalized = HashMap::with_capacity(counts.len());
    for (key, count) in counts {
        *normalized.entry(key.to_lowercase()).or_insert(0) += count;
    }
    normalized
}
