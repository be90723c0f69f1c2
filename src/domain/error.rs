//! Error types for the groop core.
//!
//! This module defines the centralized error type [`GroopError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Absent entities are not errors at the repository boundary: lookups there
//! return `Option`. [`GroopError::NotFound`] is raised only where a caller
//! requires an entity that the current state does not hold.

use thiserror::Error;

/// The main error type for groop core operations.
///
/// # Examples
///
/// ```
/// use groop_core::domain::GroopError;
///
/// fn lookup() -> Result<(), GroopError> {
///     Err(GroopError::NotFound("groop 42".to_string()))
/// }
///
/// assert_eq!(lookup().unwrap_err().to_string(), "Not found: groop 42");
/// ```
#[derive(Debug, Error)]
pub enum GroopError {
    /// A required entity is not present.
    ///
    /// The string names the entity kind and identifier that was looked up.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed (seed data, worker payloads).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The background worker is gone or rejected a message.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for groop core operations.
pub type Result<T> = std::result::Result<T, GroopError>;
