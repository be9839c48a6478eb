//! Error types for the montessori-guru advisory core
//!
//! The error surface is deliberately narrow: only the topic index failing
//! to load, the record store failing on the required base fetch, and
//! configuration problems are errors. Every other degradation (missing
//! profile, unreadable corpus source, unmatched question, malformed model
//! reply) is recovered locally and never reaches the caller as an error.

use thiserror::Error;

/// Main error type for the advisory pipeline
#[derive(Error, Debug)]
pub enum GuruError {
    /// The pre-built topic index could not be loaded at startup
    #[error("Topic index unavailable at {path}: {reason}")]
    IndexUnavailable { path: String, reason: String },

    /// The record store failed while resolving the required base record
    #[error("Record store error: {0}")]
    RecordStore(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("Advisory pipeline error: {0}")]
    Generic(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, GuruError>;

/// Convert anyhow errors to GuruError
impl From<anyhow::Error> for GuruError {
    fn from(err: anyhow::Error) -> Self {
        GuruError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_unavailable_display() {
        let err = GuruError::IndexUnavailable {
            path: "data/topic_index.json".to_string(),
            reason: "file not found".to_string(),
        };
        assert!(err.to_string().contains("data/topic_index.json"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_record_store_display() {
        let err = GuruError::RecordStore("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: GuruError = anyhow::anyhow!("something broke").into();
        assert!(matches!(err, GuruError::Generic(_)));
    }
}
