//! Error types for spotgate

/// Result type alias using spotgate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spotgate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier or statistics provisioning failed; selection cannot start
    #[error("initialization error: {0}")]
    Initialization(String),

    /// A single occurrence could not be scored
    #[error("classification error: {0}")]
    Classification(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new initialization error
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Create a new classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
