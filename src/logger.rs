use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

/// Installs the global subscriber with the filter from `logger.level` or
/// `RUST_LOG`. Fails if the host already installed one.
pub fn init() -> anyhow::Result<()> {
    let filter = config::get()
        .logger()
        .filter(std::env::var("RUST_LOG").ok());

    let env_filter =
        EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter `{filter}`"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .with_context(|| "Failed to install the tracing subscriber")
}
