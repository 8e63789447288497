//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing the roster and
//! computing coverage or payroll figures.

use thiserror::Error;

/// The main error type for the roster engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently from the store up to the HTTP layer.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds inconsistent values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time-of-day string was not in `HH:MM` form.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The offending input.
        value: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A required field was missing or held an unusable value.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A document does not exist in the given collection.
    #[error("Document '{id}' not found in '{collection}'")]
    DocumentNotFound {
        /// The collection path that was searched.
        collection: String,
        /// The id that was not found.
        id: String,
    },

    /// An employee referenced by an operation does not exist.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id.
        id: String,
    },

    /// A vocabulary entry cannot be removed while records still use it.
    #[error("{kind} '{name}' is still referenced by {references} record(s)")]
    VocabularyInUse {
        /// The vocabulary kind ("role" or "area").
        kind: String,
        /// The entry name.
        name: String,
        /// How many records reference it.
        references: usize,
    },

    /// A name that must be unique already exists.
    #[error("{kind} '{name}' already exists")]
    DuplicateName {
        /// The kind of entry ("role", "area").
        kind: String,
        /// The duplicated name.
        name: String,
    },

    /// A user profile with the same email already exists.
    #[error("Email already in use: {email}")]
    EmailInUse {
        /// The duplicated email address.
        email: String,
    },

    /// The document store failed to complete an operation.
    #[error("Store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// A document could not be converted to or from its typed form.
    #[error("Serialization error in '{collection}': {message}")]
    Serialization {
        /// The collection the document belongs to.
        collection: String,
        /// The underlying serde message.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
