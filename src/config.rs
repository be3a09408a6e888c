use crate::core::{HotelError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit configuration file.
pub const CONFIG_ENV: &str = "HOTELQL_CONFIG";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

/// Where the console finds its engine.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub protocol: String,
    pub host: String,
    /// Directory holding `<database>.db` files.
    pub data_dir: PathBuf,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            protocol: "sqlite".to_string(),
            host: "localhost".to_string(),
            data_dir: PathBuf::from("."),
        }
    }
}

/// Log output settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parses the configured level name into a tracing level.
    pub fn level(&self) -> Result<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| HotelError::Config(format!("unknown log level '{}'", self.level)))
    }
}

/// Report rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print a `(N rows)` line after every report, including empty ones.
    pub show_row_count: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { show_row_count: true }
    }
}

/// Loads configuration from a TOML file at the given path.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| HotelError::Config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| HotelError::Config(format!("{}: {}", path.display(), e)))
}

/// Finds the configuration file to use, if any.
///
/// `$HOTELQL_CONFIG` wins and must point at a readable file. Otherwise the
/// per-user file under the platform config directory is used when present.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    dirs::config_dir()
        .map(|dir| dir.join("hotelql").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Loads the configuration from the discovered path, falling back to defaults.
pub fn load() -> Result<Config> {
    match config_path() {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}
