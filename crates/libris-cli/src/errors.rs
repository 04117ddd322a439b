//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes so that scripts can tell a
//! refused loan from a missing record or a broken data directory.

use std::fmt;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Book, loan, or user not found
    NotFound { message: String, hint: String },

    /// A lending rule refused the request
    Refused {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check reported problems
    IntegrityFailed { issues: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::Refused { message, hint } => match hint {
                Some(h) => write!(f, "{}\n{}", message, h),
                None => write!(f, "{}", message),
            },
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed { issues } => {
                write!(f, "Integrity check failed ({} issue(s))", issues)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create a Refused error with message and hint.
    pub fn refused_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Refused {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Refused { .. } => exit_codes::REFUSED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed { .. } => exit_codes::INTEGRITY_FAILED,
        }
    }
}
