// ABOUTME: Validation client for AccessGate
// ABOUTME: Configurable transport strategy, envelope adapters, and a reqwest HTTP client

pub mod client;
pub mod envelope;
pub mod error;
pub mod transport;

// Re-export main types
pub use client::{ClientConfig, TokenValidator, ValidationClient};
pub use envelope::{decode, EnvelopeShape, ValidationPayload, Validity};
pub use error::{ClientError, ClientResult};
pub use transport::TransportStrategy;
