//! Error types for account-select
//!
//! This module defines a unified error type for the crate, providing
//! structured error handling with context and user-friendly messages.

use std::io;
use thiserror::Error;

/// Main error type for the account-select crate
///
/// All fallible operations across the adapter and infra layers return this
/// error type for consistent error handling and reporting. The view-model's
/// own logic is infallible: missing preferred accounts or cached credentials
/// are normal "not found" states, not errors.
///
/// # Architecture Notes
/// - Uses thiserror for automatic Display and Error trait implementations
/// - Each variant includes contextual information for debugging
/// - #[source] attribute enables error chain traversal
#[derive(Debug, Error)]
pub enum AppError {
    /// JSON serialization/deserialization failed
    #[error("JSON error: {context}")]
    JsonError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error
    #[error("File I/O error: {path}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Local auth store operation failed
    #[error("Auth store operation failed: {operation}")]
    StoreError {
        operation: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Generic error with context
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl AppError {
    /// Returns an error code for categorization
    pub fn code(&self) -> &'static str {
        match self {
            AppError::JsonError { .. } => "JSON_ERROR",
            AppError::IoError { .. } => "IO_ERROR",
            AppError::StoreError { .. } => "STORE_ERROR",
            AppError::Other { .. } => "GENERAL",
        }
    }

    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            AppError::JsonError { context, .. } => {
                format!("Failed to process {}", context)
            }
            AppError::IoError { path, .. } => {
                format!("Failed to access file: {}", path)
            }
            AppError::StoreError { operation, .. } => {
                format!("Failed to {} the local credential store", operation)
            }
            AppError::Other { message, .. } => message.clone(),
        }
    }

    /// Returns the category for error logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::JsonError { .. } | AppError::IoError { .. } => "FILE_SYSTEM",
            AppError::StoreError { .. } => "AUTH_STORE",
            AppError::Other { .. } => "GENERAL",
        }
    }
}

// Implement Serialize so hosts can surface errors to their own frontends
impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("AppError", 3)?;
        state.serialize_field("message", &self.user_message())?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("category", &self.category())?;
        state.end()
    }
}

// Convenience conversions from common error types
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Other {
            message: format!("I/O error: {}", err),
            source: Some(err.into()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError {
            context: "serialization".to_string(),
            source: err,
        }
    }
}
