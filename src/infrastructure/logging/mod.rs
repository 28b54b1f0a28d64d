// Logging module - Logging infrastructure
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use std::io;

/// Default filter when neither RUST_LOG nor the config file sets one.
pub const DEFAULT_FILTER: &str = "fpbridge=warn";
pub const VERBOSE_FILTER: &str = "fpbridge=debug";

/// Initialize logging system
///
/// Logs always go to stderr; stdout carries only command results.
/// `RUST_LOG` wins over `fallback`.
pub fn init_logging(fallback: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()?;

    tracing::debug!("fpbridge logging initialized");
    Ok(())
}
