//! Occurrence and context model
//!
//! A [`SurfaceFormOccurrence`] is a span of document text that might refer to
//! a named entity. All occurrences of one document share the same
//! [`Context`], which is either POS-tagged or plain text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A token produced by the tagger, aligned to the document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The token text
    pub token: String,

    /// Character offset of the token in the document text
    pub offset: usize,

    /// Part-of-speech tag, `None` if the tagger could not assign one
    #[serde(default, alias = "pos", skip_serializing_if = "Option::is_none")]
    pub pos_tag: Option<String>,
}

impl TaggedToken {
    /// Create a new tagged token
    pub fn new(token: impl Into<String>, offset: usize, pos_tag: Option<&str>) -> Self {
        Self {
            token: token.into(),
            offset,
            pos_tag: pos_tag.map(str::to_string),
        }
    }

    /// Get the POS tag, if any
    pub fn pos_tag(&self) -> Option<&str> {
        self.pos_tag.as_deref()
    }
}

/// Document text annotated with part-of-speech tagged tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedText {
    text: String,
    tokens: Vec<TaggedToken>,
}

impl TaggedText {
    /// Create tagged text; tokens are kept ordered by offset
    pub fn new(text: impl Into<String>, mut tokens: Vec<TaggedToken>) -> Self {
        tokens.sort_by_key(|t| t.offset);
        Self {
            text: text.into(),
            tokens,
        }
    }

    /// Get the document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tagged tokens covered by the occurrence span, in document order
    pub fn tagged_tokens(&self, occurrence: &SurfaceFormOccurrence) -> &[TaggedToken] {
        let start = occurrence.offset();
        let end = occurrence.end();

        let first = self.tokens.partition_point(|t| t.offset < start);
        let last = self.tokens.partition_point(|t| t.offset < end);

        &self.tokens[first..last.max(first)]
    }
}

/// Untagged document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
}

impl Text {
    /// Create untagged text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the document text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The document context an occurrence was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Text with POS annotations
    Tagged(Arc<TaggedText>),

    /// Text without POS annotations
    Untagged(Arc<Text>),
}

impl Context {
    /// Get the tagged text, if this context carries POS information
    pub fn as_tagged(&self) -> Option<&TaggedText> {
        match self {
            Self::Tagged(tagged) => Some(tagged),
            Self::Untagged(_) => None,
        }
    }

    /// Get the document text
    pub fn text(&self) -> &str {
        match self {
            Self::Tagged(tagged) => tagged.text(),
            Self::Untagged(text) => text.text(),
        }
    }
}

impl From<TaggedText> for Context {
    fn from(tagged: TaggedText) -> Self {
        Self::Tagged(Arc::new(tagged))
    }
}

impl From<Text> for Context {
    fn from(text: Text) -> Self {
        Self::Untagged(Arc::new(text))
    }
}

/// A surface form found at a position in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceFormOccurrence {
    surface_form: String,
    offset: usize,
    context: Context,
}

impl SurfaceFormOccurrence {
    /// Create a new occurrence
    pub fn new(surface_form: impl Into<String>, offset: usize, context: Context) -> Self {
        Self {
            surface_form: surface_form.into(),
            offset,
            context,
        }
    }

    /// Get the surface form
    pub fn surface_form(&self) -> &str {
        &self.surface_form
    }

    /// Character offset of the occurrence in the document text
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Character offset one past the end of the occurrence
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.surface_form.chars().count())
    }

    /// Get the context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Number of whitespace-separated tokens in the surface form
    pub fn token_count(&self) -> usize {
        self.surface_form.split_whitespace().count()
    }

    /// Term size class of the surface form
    pub fn termsize(&self) -> Termsize {
        Termsize::of(self)
    }

    /// Whether the first character of the surface form is uppercase
    pub fn starts_uppercase(&self) -> bool {
        self.surface_form
            .chars()
            .next()
            .map(char::is_uppercase)
            .unwrap_or(false)
    }
}

impl fmt::Display for SurfaceFormOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"@{}", self.surface_form, self.offset)
    }
}

/// Term size class of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termsize {
    /// A single token
    Unigram,
    /// More than one token
    #[serde(alias = "n-gram")]
    NGram,
}

impl Termsize {
    /// Term size class of an occurrence
    pub fn of(occurrence: &SurfaceFormOccurrence) -> Self {
        if occurrence.token_count() <= 1 {
            Self::Unigram
        } else {
            Self::NGram
        }
    }

    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unigram => "unigram",
            Self::NGram => "ngram",
        }
    }
}

impl fmt::Display for Termsize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
