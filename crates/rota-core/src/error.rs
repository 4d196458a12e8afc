// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rota queue bot.

use thiserror::Error;

/// The primary error type used across all Rota crates.
#[derive(Debug, Error)]
pub enum RotaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Messenger errors (send failure, transport unavailable).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed or out-of-policy user input. Recovered by re-prompting the
    /// originating conversation state with the message as explanation.
    #[error("{0}")]
    Validation(String),

    /// A referenced record vanished between steps.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Duplicate join or duplicate registration. Informational, not a failure.
    #[error("{0}")]
    Conflict(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RotaError {
    /// True for errors that are answered by re-prompting the user rather
    /// than aborting the dispatch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RotaError::Validation(_) | RotaError::NotFound { .. } | RotaError::Conflict(_)
        )
    }
}
