//! Spotgate Core
//!
//! Core types and error handling shared across spotgate components.
//!
//! This crate provides:
//! - The surface-form occurrence model and its tagged/untagged document context
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Context, SurfaceFormOccurrence, TaggedText, TaggedToken, Termsize, Text};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Context, SurfaceFormOccurrence, TaggedText, TaggedToken, Termsize, Text};
}
