// ABOUTME: Configuration constants for the AccessGate workspace
// ABOUTME: Environment variable names, defaults, and a trimmed env reader

pub mod constants;

use tracing::debug;

/// Read an environment variable, treating unset and blank values the same.
pub fn var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            debug!("{} is set but blank, using default", name);
            None
        }
        Err(_) => None,
    }
}

/// Read an environment variable or fall back to `default`.
pub fn var_or(name: &str, default: &str) -> String {
    var(name).unwrap_or_else(|| default.to_string())
}
