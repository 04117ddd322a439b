//! UI context for environment detection.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from the environment.
    ///
    /// Color is off when stdout is not a TTY, `NO_COLOR` is set,
    /// `TERM=dumb`, or the caller disabled it.
    pub fn from_env(json_flag: bool, color_disabled: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            color: is_tty && !color_disabled && !no_color_env && !term_is_dumb,
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }

    /// Plain, colorless context.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            mode: OutputMode::Plain,
        }
    }
}
