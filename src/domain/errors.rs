//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types; driver
//! and client errors are mapped into these variants at the adapter boundary.

use thiserror::Error;

/// Main Argus error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ArgusError {
    /// Invalid command-line input: unknown rule, bad pattern, bad URI
    #[error("{0}")]
    Usage(String),

    /// Failed to reach or authenticate against a backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// A backend query or request failed
    #[error("Query error: {0}")]
    Query(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ArgusError {
    fn from(err: std::io::Error) -> Self {
        ArgusError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ArgusError {
    fn from(err: serde_json::Error) -> Self {
        ArgusError::Serialization(err.to_string())
    }
}
