// ABOUTME: HTTP validation client issuing exactly one request per page load
// ABOUTME: Folds every transport problem into a TransportFailure outcome

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};
use url::Url;

use accessgate_config::constants::DEFAULT_ENDPOINT;
use accessgate_core::{SessionContext, Token, ValidationResult};

use crate::envelope::{decode, EnvelopeShape, Validity};
use crate::error::{ClientError, ClientResult};
use crate::transport::TransportStrategy;

/// Anything able to judge a session's token.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate the session token. Never fails; failures are outcomes.
    async fn validate(&self, session: &SessionContext) -> ValidationResult;
}

/// Validation endpoint settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub transport: TransportStrategy,
    pub envelope: EnvelopeShape,
    /// No timeout is applied when unset.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            transport: TransportStrategy::default(),
            envelope: EnvelopeShape::default(),
            timeout: None,
        }
    }

    /// Config for the production endpoint with default transport and envelope.
    pub fn default_endpoint() -> ClientResult<Self> {
        Self::parse(DEFAULT_ENDPOINT)
    }

    pub fn parse(endpoint: &str) -> ClientResult<Self> {
        let url = Url::parse(endpoint)
            .map_err(|e| ClientError::config(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        let config = Self::new(url);
        config.validate()?;
        Ok(config)
    }

    pub fn with_transport(mut self, transport: TransportStrategy) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> ClientResult<()> {
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::config(format!(
                    "Endpoint must use http or https, got {}",
                    other
                )))
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ClientError::config("Timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// reqwest-backed validation client
#[derive(Debug, Clone)]
pub struct ValidationClient {
    http: Client,
    config: ClientConfig,
}

impl ValidationClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the request and interpret the reply.
    ///
    /// A 2xx reply is interpreted by the envelope adapter. A non-2xx reply is
    /// only honoured when it explicitly rejects the token; anything else from a
    /// failing status is a transport error.
    pub async fn exchange(&self, token: &Token) -> ClientResult<ValidationResult> {
        let transport = self.config.transport.name();
        debug!(transport, endpoint = %self.config.endpoint, token = ?token, "Sending validation request");

        let response = self
            .config
            .transport
            .request(&self.http, &self.config.endpoint, token)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Validation response received");

        match decode(self.config.envelope, &body) {
            Ok(decoded) if status.is_success() => Ok(decoded.into_result()),
            Ok(decoded) if decoded.validity == Validity::Rejected => {
                debug!(status = status.as_u16(), "Honouring explicit rejection from non-2xx response");
                Ok(decoded.into_result())
            }
            Ok(_) => Err(ClientError::Status(status.as_u16())),
            Err(err) if status.is_success() => Err(err),
            Err(_) => Err(ClientError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl TokenValidator for ValidationClient {
    async fn validate(&self, session: &SessionContext) -> ValidationResult {
        let outcome = match self.exchange(session.token()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    network = err.is_network_error(),
                    "Token validation error: {}", err
                );
                ValidationResult::transport(err.to_string())
            }
        };

        match &outcome {
            ValidationResult::Valid(_) => info!(outcome = outcome.label(), "Token validated"),
            ValidationResult::TransportFailure { .. } => {}
            _ => warn!(outcome = outcome.label(), "Token refused by validation endpoint"),
        }
        outcome
    }
}
