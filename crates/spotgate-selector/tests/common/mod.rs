//! Mock collaborators for selector tests
//!
//! Configurable implementations of the `CandidateClassifier` and `Filter`
//! traits for exercising the decision tree, error isolation and ordering.

#![allow(dead_code)]

use async_trait::async_trait;
use spotgate_core::{Context, Error, Result, SurfaceFormOccurrence, TaggedText, TaggedToken, Termsize};
use spotgate_selector::{
    CandidateClass, CandidateClassification, CandidateClassifier, ClassifierSet,
    CoOccurrenceSelector, Filter, PatternFilter, PosFilter,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A configurable mock classifier
pub struct MockClassifier {
    name: String,
    termsize: Termsize,
    class: CandidateClass,
    confidence: f64,
    overrides: HashMap<String, CandidateClass>,
    failing: HashSet<String>,
    latency: HashMap<String, Duration>,
    call_count: AtomicU32,
    seen: Mutex<Vec<String>>,
}

impl MockClassifier {
    /// Create a mock that classifies everything as `term`
    pub fn new(termsize: Termsize) -> Self {
        Self {
            name: format!("mock-{}", termsize),
            termsize,
            class: CandidateClass::Term,
            confidence: 0.9,
            overrides: HashMap::new(),
            failing: HashSet::new(),
            latency: HashMap::new(),
            call_count: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Set the class returned for surface forms without an override
    pub fn with_class(mut self, class: CandidateClass) -> Self {
        self.class = class;
        self
    }

    /// Set the confidence returned with every classification
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Return `class` for one surface form
    pub fn with_override(mut self, surface_form: &str, class: CandidateClass) -> Self {
        self.overrides.insert(surface_form.to_string(), class);
        self
    }

    /// Fail with a classification error for one surface form
    pub fn failing_on(mut self, surface_form: &str) -> Self {
        self.failing.insert(surface_form.to_string());
        self
    }

    /// Delay the classification of one surface form
    pub fn with_latency(mut self, surface_form: &str, latency: Duration) -> Self {
        self.latency.insert(surface_form.to_string(), latency);
        self
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Surface forms passed to classify, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateClassifier for MockClassifier {
    async fn classify(&self, occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let surface_form = occurrence.surface_form();
        self.seen.lock().unwrap().push(surface_form.to_string());

        if let Some(latency) = self.latency.get(surface_form) {
            tokio::time::sleep(*latency).await;
        }

        if self.failing.contains(surface_form) {
            return Err(Error::classification(format!("no feature data for {}", occurrence)));
        }

        let class = self.overrides.get(surface_form).copied().unwrap_or(self.class);
        Ok(CandidateClassification::new(class, self.confidence))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn termsize(&self) -> Termsize {
        self.termsize
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    termsize: Termsize,
    error_message: String,
}

impl FailingClassifier {
    /// Create a new failing classifier
    pub fn new(termsize: Termsize) -> Self {
        Self {
            termsize,
            error_message: "statistics provider unavailable".to_string(),
        }
    }
}

#[async_trait]
impl CandidateClassifier for FailingClassifier {
    async fn classify(&self, _occurrence: &SurfaceFormOccurrence) -> Result<CandidateClassification> {
        Err(Error::classification(&self.error_message))
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn termsize(&self) -> Termsize {
        self.termsize
    }
}

/// Wraps a filter and counts how often it is consulted
pub struct CountingFilter<F> {
    inner: F,
    calls: AtomicU32,
}

impl<F: Filter> CountingFilter<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<F: Filter> Filter for CountingFilter<F> {
    fn applies(&self, occurrence: &SurfaceFormOccurrence) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.applies(occurrence)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Build a selector with the default filters around the given classifiers
pub fn selector(
    unigram: Arc<dyn CandidateClassifier>,
    ngram: Arc<dyn CandidateClassifier>,
) -> CoOccurrenceSelector {
    let classifiers = ClassifierSet::new(unigram, ngram).unwrap();
    CoOccurrenceSelector::new(
        classifiers,
        Arc::new(PosFilter::default()),
        Arc::new(PatternFilter::with_defaults().unwrap()),
    )
}

/// A tagged document split on whitespace, one tag per token (`"-"` = no tag)
pub struct Document {
    context: Context,
}

impl Document {
    pub fn tagged(text: &str, tags: &[&str]) -> Self {
        let words = word_offsets(text);
        assert_eq!(words.len(), tags.len(), "one tag per token");

        let tokens = words
            .into_iter()
            .zip(tags)
            .map(|((offset, word), tag)| {
                let tag = if *tag == "-" { None } else { Some(*tag) };
                TaggedToken::new(word, offset, tag)
            })
            .collect();

        Self {
            context: TaggedText::new(text, tokens).into(),
        }
    }

    pub fn untagged(text: &str) -> Self {
        Self {
            context: spotgate_core::Text::new(text).into(),
        }
    }

    /// The first occurrence of `surface_form` in the document
    pub fn occurrence(&self, surface_form: &str) -> SurfaceFormOccurrence {
        self.occurrence_after(surface_form, 0)
    }

    /// The first occurrence of `surface_form` at or after character `from`
    pub fn occurrence_after(&self, surface_form: &str, from: usize) -> SurfaceFormOccurrence {
        let text = self.context.text();
        let start_byte = text
            .char_indices()
            .nth(from)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let byte = start_byte
            + text[start_byte..]
                .find(surface_form)
                .unwrap_or_else(|| panic!("'{}' not in document", surface_form));
        let offset = text[..byte].chars().count();

        SurfaceFormOccurrence::new(surface_form, offset, self.context.clone())
    }
}

fn word_offsets(text: &str) -> Vec<(usize, String)> {
    let mut words = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (offset, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            if let Some(word) = current.take() {
                words.push(word);
            }
        } else {
            current
                .get_or_insert_with(|| (offset, String::new()))
                .1
                .push(c);
        }
    }
    if let Some(word) = current {
        words.push(word);
    }

    words
}

/// Surface forms of a list of occurrences
pub fn surface_forms(occurrences: &[SurfaceFormOccurrence]) -> Vec<&str> {
    occurrences.iter().map(|o| o.surface_form()).collect()
}
