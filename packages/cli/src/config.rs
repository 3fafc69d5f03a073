use std::num::ParseIntError;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use url::Url;

use accessgate_client::{ClientConfig, ClientError, EnvelopeShape, TransportStrategy};
use accessgate_config::constants::*;
use accessgate_config::{var, var_or};
use accessgate_core::TokenFormat;
use accessgate_view::{Links, PageLayout};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid number in {var}: {source}")]
    InvalidNumber {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{var} must be an absolute http(s) URL, got {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Everything one page load needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub client: ClientConfig,
    pub token_param: String,
    pub token_format: TokenFormat,
    pub warning_days: i64,
    pub links: Links,
    pub layout: PageLayout,
}

impl GateConfig {
    /// Load `.env` if present, then read every setting with its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint = parse_http_url(
            ACCESSGATE_ENDPOINT,
            &var_or(ACCESSGATE_ENDPOINT, DEFAULT_ENDPOINT),
        )?;

        let transport = match var_or(ACCESSGATE_TRANSPORT, DEFAULT_TRANSPORT).parse::<TransportStrategy>()? {
            TransportStrategy::GetDispatcher { .. } => TransportStrategy::dispatcher(var_or(
                ACCESSGATE_DISPATCH_ACTION,
                DEFAULT_DISPATCH_ACTION,
            )),
            other => other,
        };

        let envelope: EnvelopeShape = var_or(ACCESSGATE_ENVELOPE, DEFAULT_ENVELOPE).parse()?;

        let timeout = var(ACCESSGATE_REQUEST_TIMEOUT_SECS)
            .map(|raw| {
                raw.parse::<u64>().map_err(|source| ConfigError::InvalidNumber {
                    var: ACCESSGATE_REQUEST_TIMEOUT_SECS,
                    source,
                })
            })
            .transpose()?
            .map(Duration::from_secs);

        let client = ClientConfig::new(endpoint)
            .with_transport(transport)
            .with_envelope(envelope)
            .with_timeout(timeout);
        client.validate()?;

        let warning_days = match var(ACCESSGATE_WARNING_DAYS) {
            Some(raw) => raw.parse::<i64>().map_err(|source| ConfigError::InvalidNumber {
                var: ACCESSGATE_WARNING_DAYS,
                source,
            })?,
            None => DEFAULT_WARNING_DAYS,
        };

        let links = Links {
            purchase: parse_http_url(
                ACCESSGATE_PURCHASE_URL,
                &var_or(ACCESSGATE_PURCHASE_URL, DEFAULT_PURCHASE_URL),
            )?
            .to_string(),
            extend: parse_http_url(
                ACCESSGATE_EXTEND_URL,
                &var_or(ACCESSGATE_EXTEND_URL, DEFAULT_EXTEND_URL),
            )?
            .to_string(),
        };

        Ok(GateConfig {
            client,
            token_param: var_or(ACCESSGATE_TOKEN_PARAM, DEFAULT_TOKEN_PARAM),
            token_format: TokenFormat::new(var_or(ACCESSGATE_TOKEN_PREFIX, DEFAULT_TOKEN_PREFIX)),
            warning_days,
            links,
            layout: PageLayout {
                loading_id: var_or(ACCESSGATE_LOADING_ID, DEFAULT_LOADING_ID),
                content_id: var_or(ACCESSGATE_CONTENT_ID, DEFAULT_CONTENT_ID),
            },
        })
    }

    /// Defaults with a different validation endpoint.
    pub fn for_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        let url = parse_http_url(ACCESSGATE_ENDPOINT, endpoint)?;
        Ok(GateConfig {
            client: ClientConfig::new(url),
            token_param: DEFAULT_TOKEN_PARAM.to_string(),
            token_format: TokenFormat::default(),
            warning_days: DEFAULT_WARNING_DAYS,
            links: Links::default(),
            layout: PageLayout::default(),
        })
    }

    /// Printable view of the effective settings.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            endpoint: self.client.endpoint.to_string(),
            transport: self.client.transport.to_string(),
            envelope: self.client.envelope.to_string(),
            timeout_secs: self.client.timeout.map(|t| t.as_secs()),
            token_param: self.token_param.clone(),
            token_prefix: self.token_format.prefix().to_string(),
            warning_days: self.warning_days,
            purchase_url: self.links.purchase.clone(),
            extend_url: self.links.extend.clone(),
            loading_id: self.layout.loading_id.clone(),
            content_id: self.layout.content_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub endpoint: String,
    pub transport: String,
    pub envelope: String,
    pub timeout_secs: Option<u64>,
    pub token_param: String,
    pub token_prefix: String,
    pub warning_days: i64,
    pub purchase_url: String,
    pub extend_url: String,
    pub loading_id: String,
    pub content_id: String,
}

fn parse_http_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { var });
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidUrl {
            var,
            value: value.to_string(),
        }),
    }
}
