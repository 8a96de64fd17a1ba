//! Environment-driven render configuration.

use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub color: bool,
    pub line_numbers: bool,
}

impl RenderConfig {
    pub fn from_env() -> Self {
        Self::from_env_with_tty(std::io::stdout().is_terminal())
    }

    /// Resolves settings as [`RenderConfig::from_env`] does, with the stdout tty
    /// check supplied by the caller.
    pub fn from_env_with_tty(stdout_is_tty: bool) -> Self {
        let color = if env_string_opt("NO_COLOR").is_some() {
            false
        } else if env_flag("CODEPAD_COLOR") {
            true
        } else {
            stdout_is_tty
        };

        Self {
            color,
            line_numbers: env::var("CODEPAD_LINE_NUMBERS")
                .map(|value| value.trim() != "0")
                .unwrap_or(true),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
