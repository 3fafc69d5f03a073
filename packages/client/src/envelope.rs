// ABOUTME: Adapters that normalize flat and nested response envelopes
// ABOUTME: Every wire shape ends up as the same ValidationResult

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use accessgate_core::constants::EXPIRED_REASON;
use accessgate_core::{parse_expiry, AccessGrant, CustomerData, ValidationResult};

use crate::error::{ClientError, ClientResult};

/// Which response layout the endpoint speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{ "valid": bool, ... }`
    Flat,
    /// `{ "success": bool, "data": { "valid": bool, ... } }`
    Nested,
    /// Pick per response
    #[default]
    Auto,
}

impl fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Nested => write!(f, "nested"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for EnvelopeShape {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "nested" => Ok(Self::Nested),
            "auto" => Ok(Self::Auto),
            _ => Err(ClientError::config(format!(
                "Unknown envelope: {}. Supported: flat, nested, auto",
                s
            ))),
        }
    }
}

/// The validation fields, wherever the envelope put them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPayload {
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default, deserialize_with = "lenient_customer")]
    pub customer_data: Option<CustomerData>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub days_remaining: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub expires_on: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub expired_on: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

// PHP backends encode an empty map as `[]`, so anything that is not an object
// is treated as no customer data.
fn lenient_customer<'de, D>(deserializer: D) -> Result<Option<CustomerData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

fn lenient_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// Only strings can carry a parseable date; anything else is treated as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// How explicitly a decoded payload speaks about validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Rejected,
    /// Neither an explicit yes nor an explicit no
    Unconfirmed,
}

#[derive(Debug, Clone)]
pub struct Decoded {
    pub validity: Validity,
    pub payload: ValidationPayload,
}

impl Decoded {
    /// Map onto the normalized outcome. Only an explicit `Valid` unlocks access.
    pub fn into_result(self) -> ValidationResult {
        let payload = self.payload;
        if self.validity == Validity::Valid {
            return ValidationResult::Valid(AccessGrant {
                customer: payload.customer_data,
                days_remaining: payload.days_remaining,
                expires_on: payload.expires_on.as_deref().and_then(parse_expiry),
            });
        }

        let expired = payload
            .reason
            .as_deref()
            .map(|r| r.trim().eq_ignore_ascii_case(EXPIRED_REASON))
            .unwrap_or(false);

        if expired {
            let expired_on = payload
                .expired_on
                .as_deref()
                .or(payload.expires_on.as_deref())
                .and_then(parse_expiry);
            ValidationResult::ExpiredRejection { expired_on }
        } else {
            ValidationResult::InvalidRejection {
                reason: payload.reason,
                message: payload.message,
            }
        }
    }
}

/// Decode a response body according to `shape`.
///
/// Bodies that are not JSON objects, or that carry no validity signal at all,
/// are malformed.
pub fn decode(shape: EnvelopeShape, body: &[u8]) -> ClientResult<Decoded> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(object) = value else {
        return Err(ClientError::invalid("response body is not a JSON object"));
    };

    let shape = match shape {
        EnvelopeShape::Auto => detect(&object),
        explicit => explicit,
    };
    debug!(envelope = %shape, "Decoding validation response");

    match shape {
        EnvelopeShape::Nested => decode_nested(object),
        _ => decode_flat(object),
    }
}

fn detect(object: &Map<String, Value>) -> EnvelopeShape {
    // A top-level validity flag is authoritative whatever else sits beside it
    if matches!(object.get("valid"), Some(Value::Bool(_))) {
        return EnvelopeShape::Flat;
    }
    let has_data = matches!(object.get("data"), Some(Value::Object(_)) | Some(Value::String(_)));
    let success_without_valid = object.contains_key("success") && !object.contains_key("valid");
    if has_data || success_without_valid {
        EnvelopeShape::Nested
    } else {
        EnvelopeShape::Flat
    }
}

fn decode_flat(object: Map<String, Value>) -> ClientResult<Decoded> {
    let payload: ValidationPayload = serde_json::from_value(Value::Object(object))?;
    let validity = match payload.valid {
        Some(true) => Validity::Valid,
        Some(false) => Validity::Rejected,
        None => return Err(ClientError::invalid("flat envelope has no valid flag")),
    };
    Ok(Decoded { validity, payload })
}

fn decode_nested(mut object: Map<String, Value>) -> ClientResult<Decoded> {
    let success = match object.remove("success") {
        Some(Value::Bool(b)) => Some(b),
        None | Some(Value::Null) => None,
        Some(other) => {
            return Err(ClientError::invalid(format!(
                "success flag is not a boolean: {}",
                other
            )))
        }
    };
    let outer_message = match object.remove("message") {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    let mut payload = match object.remove("data") {
        Some(data @ Value::Object(_)) => serde_json::from_value::<ValidationPayload>(data)?,
        // wp_send_json_error("...") puts a bare message in `data`
        Some(Value::String(message)) => ValidationPayload {
            message: Some(message),
            ..Default::default()
        },
        _ => ValidationPayload::default(),
    };
    if payload.message.is_none() {
        payload.message = outer_message;
    }

    let validity = match (success, payload.valid) {
        (Some(false), _) | (_, Some(false)) => Validity::Rejected,
        (_, Some(true)) => Validity::Valid,
        (Some(true), None) => Validity::Unconfirmed,
        (None, None) => {
            return Err(ClientError::invalid(
                "nested envelope has neither a success nor a valid flag",
            ))
        }
    };
    Ok(Decoded { validity, payload })
}
