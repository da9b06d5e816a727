//! TOML configuration
//!
//! ```toml
//! [store]
//! path = "features.fks"   # omit for a memory store
//! table = "features"
//! compression = "zstd"    # none | deflate | zstd
//! compression_level = 19  # zstd only
//! default_srid = 4326
//!
//! [logging]
//! level = "info"
//! ```

use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::compression::CompressionFactory;
use crate::coordinate::DEFAULT_SRID;
use crate::errors::{FeatureError, FeatureResult};
use crate::store::TableName;

/// Store settings from the `[store]` section
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Snapshot file; `None` selects the memory store
    pub path: Option<PathBuf>,
    pub table: TableName,
    /// Snapshot compression name, checked against the compression factory
    pub compression: String,
    /// zstd level; `None` keeps the handler default
    pub compression_level: Option<i32>,
    /// SRID given to features created without one
    pub default_srid: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            table: TableName::default(),
            compression: "none".to_string(),
            compression_level: None,
            default_srid: DEFAULT_SRID,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store: StoreConfig,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: StoreConfig::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string; absent keys keep their defaults
    pub fn from_str(content: &str) -> FeatureResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| FeatureError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(store) = toml_value.get("store").and_then(|v| v.as_table()) {
            if let Some(path) = store.get("path") {
                config.store.path = Some(PathBuf::from(expect_str(path, "store.path")?));
            }
            if let Some(table) = store.get("table") {
                config.store.table = TableName::new(expect_str(table, "store.table")?)?;
            }
            if let Some(compression) = store.get("compression") {
                config.store.compression = expect_str(compression, "store.compression")?.to_lowercase();
            }
            if let Some(level) = store.get("compression_level") {
                let level = level
                    .as_integer()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| FeatureError::ConfigError("store.compression_level must be an integer".to_string()))?;
                config.store.compression_level = Some(level);
            }
            CompressionFactory::from_config(&config.store.compression, config.store.compression_level)?;
            if let Some(srid) = store.get("default_srid") {
                let srid = srid
                    .as_integer()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| FeatureError::ConfigError("store.default_srid must be a 32-bit integer".to_string()))?;
                config.store.default_srid = srid;
            }
        }

        if let Some(level) = toml_value
            .get("logging")
            .and_then(|v| v.as_table())
            .and_then(|t| t.get("level"))
        {
            let level = expect_str(level, "logging.level")?;
            config.log_level = LevelFilter::from_str(level)
                .map_err(|_| FeatureError::ConfigError(format!("Unknown log level: {}", level)))?;
        }

        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn from_file(path: impl AsRef<Path>) -> FeatureResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(FeatureError::IoError(e)),
        }
    }
}

fn expect_str<'a>(value: &'a toml::Value, key: &str) -> FeatureResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| FeatureError::ConfigError(format!("{} must be a string", key)))
}
