// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the MyRemind renewal reminder service.

use thiserror::Error;

/// The primary error type used across all MyRemind traits and operations.
#[derive(Debug, Error)]
pub enum RemindError {
    /// Malformed input (bad date format, empty required field, negative amount).
    /// Rejected at the operation boundary before any mutation.
    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// No resolvable user for an owner-scoped operation.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Referenced row does not exist or does not belong to the caller.
    /// Ownership failures deliberately surface as NotFound to avoid leaking
    /// the existence of other users' data.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected a write. Callers that implement a
    /// converge-on-duplicate protocol catch this and re-query.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage backend errors (connection, query failure, missing schema).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Push/email dispatch errors. Always non-fatal to the triggering
    /// operation; logged and counted by the caller.
    #[error("dispatch error: {message}")]
    Dispatch { message: String },

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RemindError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
