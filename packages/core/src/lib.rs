// ABOUTME: Core types for the AccessGate token gate
// ABOUTME: Token shape, session context, customer data, validation outcomes and errors

pub mod constants;
pub mod customer;
pub mod error;
pub mod outcome;
pub mod session;
pub mod token;

// Re-export main types
pub use customer::{CustomerData, FormField};
pub use error::{GateError, GateResult};
pub use outcome::{parse_expiry, AccessGrant, ValidationResult};
pub use session::SessionContext;
pub use token::{extract_param, extract_token, Token, TokenFormat};
