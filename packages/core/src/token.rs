// ABOUTME: Access token extraction from the page location and local shape checking
// ABOUTME: A Token value can only be built by passing the format guard

use std::fmt;

use tracing::debug;
use url::Url;

use accessgate_config::constants::{DEFAULT_TOKEN_PARAM, DEFAULT_TOKEN_PREFIX};

use crate::constants::TOKEN_HEX_LEN;
use crate::error::{GateError, GateResult};

/// Number of hex characters kept when a token is redacted for logs
const REDACTED_HEX_CHARS: usize = 8;

/// A well-formed access token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix plus the first few hex characters, safe to log.
    pub fn redacted(&self) -> String {
        let keep = self.0.len() - TOKEN_HEX_LEN + REDACTED_HEX_CHARS;
        format!("{}…", &self.0[..keep])
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.redacted()).finish()
    }
}

/// The fixed token shape: a literal prefix followed by exactly 64 lowercase
/// hex characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFormat {
    prefix: String,
}

impl TokenFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Check a candidate against the shape.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate
            .strip_prefix(self.prefix.as_str())
            .map(|hex| {
                hex.len() == TOKEN_HEX_LEN
                    && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            })
            .unwrap_or(false)
    }

    /// Run the format guard over an extracted value.
    ///
    /// An absent or empty value is `MissingToken`; anything that does not
    /// match the shape is `MalformedToken`.
    pub fn check(&self, candidate: Option<&str>) -> GateResult<Token> {
        match candidate {
            None | Some("") => Err(GateError::MissingToken),
            Some(value) if self.matches(value) => Ok(Token(value.to_string())),
            Some(value) => {
                debug!(len = value.len(), "Token failed format check");
                Err(GateError::MalformedToken)
            }
        }
    }
}

impl Default for TokenFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_PREFIX)
    }
}

/// Read a named query parameter from the page location.
///
/// The first occurrence wins and percent-encoding is decoded. Empty values are
/// reported as absent.
pub fn extract_param(location: &Url, name: &str) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Read the token using the default `token` parameter name.
pub fn extract_token(location: &Url) -> Option<String> {
    extract_param(location, DEFAULT_TOKEN_PARAM)
}
