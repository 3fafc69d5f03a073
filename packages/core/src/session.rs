// ABOUTME: Immutable per-page-load session context
// ABOUTME: Built once at startup and passed by reference through the pipeline

use tracing::{debug, warn};
use url::Url;

use crate::error::GateResult;
use crate::token::{extract_param, Token, TokenFormat};

/// Everything a single validation pass needs to know about the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: Token,
    location: Url,
}

impl SessionContext {
    /// Extract and guard the token from the page location.
    ///
    /// Fails with `MissingToken` or `MalformedToken` before anything touches
    /// the network.
    pub fn establish(location: &Url, param: &str, format: &TokenFormat) -> GateResult<Self> {
        let raw = extract_param(location, param);
        match format.check(raw.as_deref()) {
            Ok(token) => {
                debug!(token = ?token, "Session established");
                Ok(Self {
                    token,
                    location: location.clone(),
                })
            }
            Err(err) => {
                warn!(kind = err.kind(), param, "Token rejected locally");
                Err(err)
            }
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn location(&self) -> &Url {
        &self.location
    }
}
