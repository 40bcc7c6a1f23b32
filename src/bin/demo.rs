use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hearth::app::{self, AppConfig};
use hearth::build_info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!(
        build = %build_info::BUILD,
        optimized = build_info::BUILD.is_optimized(),
        "Hearth demo"
    );

    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        AppConfig::default()
    });

    app::run(config).context("demo event loop failed")
}
