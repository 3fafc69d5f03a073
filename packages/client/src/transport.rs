// ABOUTME: Transport strategies for carrying the token to the validation endpoint
// ABOUTME: JSON body POST, query-string GET, or GET against an action dispatcher

use std::fmt;
use std::str::FromStr;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use url::Url;

use accessgate_config::constants::DEFAULT_DISPATCH_ACTION;
use accessgate_core::Token;

use crate::error::{ClientError, ClientResult};

/// Query/body key the token travels under
pub const TOKEN_FIELD: &str = "token";

/// Query key for the dispatcher action discriminator
pub const ACTION_FIELD: &str = "action";

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

/// How the validation request is shaped on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransportStrategy {
    /// `POST` with `{"token": ...}` as the JSON body
    PostJson,
    /// `GET ?token=...`
    #[default]
    GetQuery,
    /// `GET ?action=...&token=...` against an AJAX-style dispatcher
    GetDispatcher { action: String },
}

impl TransportStrategy {
    pub fn dispatcher(action: impl Into<String>) -> Self {
        Self::GetDispatcher {
            action: action.into(),
        }
    }

    /// Build the single validation request for `token`.
    pub fn request(&self, http: &Client, endpoint: &Url, token: &Token) -> RequestBuilder {
        let builder = match self {
            Self::PostJson => http.post(endpoint.clone()).json(&TokenRequest {
                token: token.as_str(),
            }),
            Self::GetQuery => http
                .get(endpoint.clone())
                .query(&[(TOKEN_FIELD, token.as_str())]),
            Self::GetDispatcher { action } => http
                .get(endpoint.clone())
                .query(&[(ACTION_FIELD, action.as_str()), (TOKEN_FIELD, token.as_str())]),
        };
        builder.header(reqwest::header::ACCEPT, "application/json")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PostJson => "post-json",
            Self::GetQuery => "get-query",
            Self::GetDispatcher { .. } => "get-dispatcher",
        }
    }
}

impl fmt::Display for TransportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetDispatcher { action } => write!(f, "get-dispatcher ({})", action),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for TransportStrategy {
    type Err = ClientError;

    /// Dispatcher strategies parsed from a string use the default action.
    fn from_str(s: &str) -> ClientResult<Self> {
        match s.to_lowercase().as_str() {
            "post-json" | "post" => Ok(Self::PostJson),
            "get-query" | "get" => Ok(Self::GetQuery),
            "get-dispatcher" | "dispatcher" => Ok(Self::dispatcher(DEFAULT_DISPATCH_ACTION)),
            _ => Err(ClientError::config(format!(
                "Unknown transport: {}. Supported: post-json, get-query, get-dispatcher",
                s
            ))),
        }
    }
}
