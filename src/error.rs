//! Error handling for the quirk engine
//!
//! Provides centralized error types using thiserror. Probe failures are never
//! represented here — a probe that cannot answer reports a negative result
//! instead of an error. Only mutations (package operations, file edits,
//! regeneration commands) produce these errors, and they abort the run.

use thiserror::Error;

/// Main error type for the quirk engine
#[derive(Error, Debug)]
pub enum QuirkError {
    /// IO errors (file edits, marker removal, directory cleanup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A package mutation returned a nonzero exit status
    #[error("Package {action} failed for [{packages}]: {message}")]
    Mutation {
        action: String,
        packages: String,
        message: String,
    },

    /// An external command needed for a mutation could not be run or failed
    #[error("Command `{command}` failed: {message}")]
    Command { command: String, message: String },

    /// Engine configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for quirk engine operations
pub type Result<T> = std::result::Result<T, QuirkError>;

impl QuirkError {
    /// Create a mutation error from the failed action, target set, and backend output
    pub fn mutation(
        action: impl Into<String>,
        packages: &[String],
        message: impl Into<String>,
    ) -> Self {
        Self::Mutation {
            action: action.into(),
            packages: packages.join(", "),
            message: message.into(),
        }
    }

    /// Create a command error
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
