//! Error types for the coordinator library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::StepKey;

/// Comprehensive error type for all coordinator operations.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Client plan not found for the given ID
    #[error("Client with ID {id} not found")]
    ClientNotFound { id: u64 },
    /// Attempted to complete a checklist step whose dependency is incomplete
    #[error("Step '{step}' is blocked: complete '{depends_on}' first")]
    BlockedStep { step: StepKey, depends_on: StepKey },
    /// Shortlist operation referenced a program that is not on the shortlist
    #[error("Program '{program_id}' is not on the shortlist")]
    EntryNotFound { program_id: String },
    /// Placement status outside the enumerated vocabulary
    #[error(
        "Invalid placement status '{value}'. Must be one of: Vetting, Presented to Family, \
         Application Submitted, Confirmed, Declined, Waitlisted"
    )]
    InvalidStatus { value: String },
    /// Weekly update field name outside the enumerated set
    #[error("Unknown weekly update field '{value}'")]
    UnknownField { value: String },
    /// Save rejected because the stored document moved past the loaded revision
    #[error("Client {id} was modified concurrently (stale revision {revision}); reload and retry")]
    StaleWrite { id: u64, revision: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CoordinatorError {
    /// Creates a database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }

    /// Creates an invalid-input error for a named field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait for mapping database results with a context message.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CoordinatorError::database_error(message, e))
    }
}

/// Result type alias for coordinator operations
pub type Result<T> = std::result::Result<T, CoordinatorError>;
