// ABOUTME: AccessGate page bootstrap and environment configuration
// ABOUTME: Wires the token guard, validation client and presentation layer into one page load

pub mod bootstrap;
pub mod config;

#[cfg(test)]
mod tests;

pub use bootstrap::{Gate, PageLoadReport};
pub use config::{ConfigError, ConfigSummary, GateConfig};

use accessgate_config::constants::RUST_LOG;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
