use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_MAX_INPUT_BYTES, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub timezone: TimezoneConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneConfig {
    /// Resolve undeclared zone names (Windows or IANA) through the bundled
    /// timezone database instead of failing the conversion.
    pub resolve_windows_names: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub max_bytes: u64,
}

impl InputConfig {
    /// ## Summary
    /// Checks a file length against the configured ceiling.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if `len` exceeds `max_bytes`.
    pub fn check_len(&self, len: u64) -> CoreResult<()> {
        if len > self.max_bytes {
            return Err(CoreError::InvalidInput(format!(
                "input is {len} bytes, limit is {}",
                self.max_bytes
            )));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `KALENDS_*` environment variables and an
    /// optional `kalends.toml` file into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder(environment())?
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn builder(
        environment: config::Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default("timezone.resolve_windows_names", false)?
            .set_default("input.max_bytes", DEFAULT_MAX_INPUT_BYTES)?
            .add_source(environment))
    }

    /// ## Summary
    /// Builds settings from defaults plus a TOML document, ignoring the
    /// environment file lookup. Used by tests and embedders.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or does not deserialize.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(Self::builder(environment())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// `KALENDS_<SECTION>__<KEY>`, e.g. `KALENDS_INPUT__MAX_BYTES`. Keys contain
/// underscores, so sections are separated by a double underscore.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, app = APP_NAME, "No .env file loaded");
    }

    Settings::load()
}
