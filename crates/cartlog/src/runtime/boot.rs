//! Boot: logging init and config load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::CartlogConfig;

/// Initialise the tracing / logging subsystem.
///
/// Log output goes to stderr so it never mixes with records on stdout.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cartlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config from `config_path` if given, else from the usual locations.
pub fn load_config(config_path: Option<&str>) -> Result<CartlogConfig, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => CartlogConfig::load_from(path)?,
        None => CartlogConfig::load()?,
    };
    info!(
        "Loaded configuration: buffer_threshold={} json={} show_raw={}",
        config.scan.buffer_threshold, config.output.json, config.output.show_raw
    );
    Ok(config)
}
