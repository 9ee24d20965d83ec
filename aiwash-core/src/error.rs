//! Error types for the classification engine

use thiserror::Error;

/// Error type for engine operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or inconsistent configuration (centroids, tunables)
    ///
    /// This is the only fatal class: a corrupted configuration must halt the
    /// run instead of producing silently wrong labels.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Embedding provider failure for a single sentence
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Pattern compilation failure
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error while loading configuration artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error must abort a batch run rather than be isolated to
    /// one sentence.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
