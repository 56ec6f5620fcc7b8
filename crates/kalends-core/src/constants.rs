/// Application name, used as the configuration file stem and env prefix.
pub const APP_NAME: &str = "kalends";

pub const CONFIG_FILE_NAME: &str = const_str::concat!(APP_NAME, ".toml");
pub const ENV_PREFIX: &str = "KALENDS";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Largest calendar file the binary will read into memory.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;
