// ABOUTME: Error taxonomy for a single page-load validation pass
// ABOUTME: Each variant maps to exactly one user-facing message

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::{
    MALFORMED_TOKEN_MESSAGE, MISSING_TOKEN_MESSAGE, REJECTED_TOKEN_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};

pub type GateResult<T> = Result<T, GateError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("No access token provided")]
    MissingToken,

    #[error("Access token has an invalid format")]
    MalformedToken,

    /// Carries the diagnostic detail for logs only.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Access token expired")]
    ExpiredToken { expired_on: Option<NaiveDate> },

    #[error("Access token rejected (reason: {})", reason.as_deref().unwrap_or("unspecified"))]
    RejectedToken {
        reason: Option<String>,
        message: Option<String>,
    },
}

impl GateError {
    /// Message safe to put in front of the end user.
    ///
    /// Transport failures always produce the generic support message, whatever
    /// the underlying cause was.
    pub fn user_message(&self) -> String {
        match self {
            GateError::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            GateError::MalformedToken => MALFORMED_TOKEN_MESSAGE.to_string(),
            GateError::TransportFailure(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            GateError::ExpiredToken { .. } => REJECTED_TOKEN_MESSAGE.to_string(),
            GateError::RejectedToken { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(REJECTED_TOKEN_MESSAGE)
                .to_string(),
        }
    }

    /// True for failures detected before any network access.
    pub fn is_local(&self) -> bool {
        matches!(self, GateError::MissingToken | GateError::MalformedToken)
    }

    /// Short label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GateError::MissingToken => "missing_token",
            GateError::MalformedToken => "malformed_token",
            GateError::TransportFailure(_) => "transport_failure",
            GateError::ExpiredToken { .. } => "expired_token",
            GateError::RejectedToken { .. } => "rejected_token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_hides_detail() {
        let err = GateError::TransportFailure("connection refused (os error 111)".to_string());
        let message = err.user_message();
        assert_eq!(message, TRANSPORT_FAILURE_MESSAGE);
        assert!(!message.contains("os error"));
        assert!(err.to_string().contains("os error"));
    }

    #[test]
    fn test_rejection_prefers_server_message() {
        let err = GateError::RejectedToken {
            reason: Some("revoked".to_string()),
            message: Some("This link was revoked by support.".to_string()),
        };
        assert_eq!(err.user_message(), "This link was revoked by support.");
    }

    #[test]
    fn test_rejection_blank_message_falls_back() {
        let err = GateError::RejectedToken {
            reason: None,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message(), REJECTED_TOKEN_MESSAGE);
    }

    #[test]
    fn test_local_errors() {
        assert!(GateError::MissingToken.is_local());
        assert!(GateError::MalformedToken.is_local());
        assert!(!GateError::TransportFailure(String::new()).is_local());
        assert!(!GateError::ExpiredToken { expired_on: None }.is_local());
    }
}
