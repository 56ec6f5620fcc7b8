use std::path::PathBuf;

use kalends_app::decode_file;
use kalends_core::config::load_config;
use kalends_core::constants::DEFAULT_LOG_LEVEL;
use kalends_core::error::CoreError;
use kalends_rfc::rfc::ical::diagnostics::TracingSink;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping {DEFAULT_LOG_LEVEL}");
    }

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| CoreError::InvalidInput("usage: kalends <calendar.ics>".to_string()))?;

    let entry = decode_file(&path, &config, &mut TracingSink)?;

    println!("{}", serde_json::to_string_pretty(&entry)?);

    Ok(())
}
