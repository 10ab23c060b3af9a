//! Error types for the summarization pipeline
//!
//! Every stage returns [`Result`]; nothing is recovered locally, so the first
//! error ends the run.

use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: File content is not valid UTF-8
    E001Decoding,
    /// E002: File content is not valid JSON
    E002Parse,
    /// E003: JSON is valid but not an array of objects
    E003Schema,
    /// E004: Event is missing a required field or has an unusable value
    E004Validation,
    /// E005: Required run parameter missing or invalid
    E005Configuration,
    /// E006: Object store operation failed
    E006Storage,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001Decoding => "E001",
            Self::E002Parse => "E002",
            Self::E003Schema => "E003",
            Self::E004Validation => "E004",
            Self::E005Configuration => "E005",
            Self::E006Storage => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a summarization run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File bytes could not be decoded as UTF-8
    #[error("[E001] Failed to decode '{path}' as UTF-8: {source}")]
    Decoding {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// File content is not valid JSON
    #[error("[E002] Invalid JSON in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// File content is JSON but not the expected shape
    #[error("[E003] Unexpected JSON layout in '{path}': {reason}")]
    Schema { path: String, reason: String },

    /// A single event failed validation
    #[error("[E004] Invalid event #{position} in '{path}': {reason} (record: {record})")]
    Validation {
        path: String,
        position: usize,
        reason: String,
        record: String,
    },

    /// A run parameter is missing or unusable
    #[error("[E005] Invalid configuration: {message}")]
    Configuration { message: String },

    /// The object store rejected a list, read or write
    #[error("[E006] Storage {operation} failed for '{path}': {message}")]
    Storage {
        operation: &'static str,
        path: String,
        message: String,
    },
}

impl PipelineError {
    /// Create a schema error for the given file
    pub fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a storage error for the given operation and object path
    pub fn storage(
        operation: &'static str,
        path: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Storage {
            operation,
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Decoding { .. } => ErrorCode::E001Decoding,
            Self::Parse { .. } => ErrorCode::E002Parse,
            Self::Schema { .. } => ErrorCode::E003Schema,
            Self::Validation { .. } => ErrorCode::E004Validation,
            Self::Configuration { .. } => ErrorCode::E005Configuration,
            Self::Storage { .. } => ErrorCode::E006Storage,
        }
    }
}

/// Result type alias for PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;
