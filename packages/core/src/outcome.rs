// ABOUTME: Normalized outcome of the remote validation call
// ABOUTME: Independent of the wire envelope the endpoint happened to use

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::customer::CustomerData;
use crate::error::{GateError, GateResult};

/// What a valid token unlocks for this page load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessGrant {
    pub customer: Option<CustomerData>,
    pub days_remaining: Option<i64>,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(AccessGrant),
    ExpiredRejection {
        expired_on: Option<NaiveDate>,
    },
    InvalidRejection {
        reason: Option<String>,
        message: Option<String>,
    },
    /// Detail is diagnostic only.
    TransportFailure {
        error: String,
    },
}

impl ValidationResult {
    pub fn transport(error: impl Into<String>) -> Self {
        Self::TransportFailure {
            error: error.into(),
        }
    }

    /// Fold the outcome into the error taxonomy.
    pub fn into_grant(self) -> GateResult<AccessGrant> {
        match self {
            Self::Valid(grant) => Ok(grant),
            Self::ExpiredRejection { expired_on } => Err(GateError::ExpiredToken { expired_on }),
            Self::InvalidRejection { reason, message } => {
                Err(GateError::RejectedToken { reason, message })
            }
            Self::TransportFailure { error } => Err(GateError::TransportFailure(error)),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid(_) => "valid",
            Self::ExpiredRejection { .. } => "expired",
            Self::InvalidRejection { .. } => "rejected",
            Self::TransportFailure { .. } => "transport_failure",
        }
    }
}

/// Parse an expiry timestamp into the calendar date shown to the user.
///
/// Accepts RFC 3339 date-times, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
/// Date-times keep the calendar date of their own offset.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
