//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (storage failures and anything unhandled)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific outcomes
pub mod exit_codes {
    /// Book, loan, or user id not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Request refused by a lending rule (book not available, loan already closed).
    pub const REFUSED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variable selecting the config file.
pub const CONFIG_ENV: &str = "LIBRIS_CONFIG";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "LIBRIS_LOG";
