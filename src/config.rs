//! Application configuration.
//!
//! Loaded from config.json at startup; a default config file is written on
//! first run.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default config file name.
pub const DEFAULT_FILE_NAME: &str = "config.json";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Search configuration.
    pub search: SearchConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory path.
    pub data_dir: String,
    /// Uploaded documents directory (relative to data_dir).
    pub uploads_dir: String,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search index database file (relative to data_dir).
    pub db_file: String,
    /// Skip common English articles and verbs when indexing documents.
    pub ignore_common_words: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: "data".to_string(), uploads_dir: "uploads".to_string() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { db_file: "search.db".to_string(), ignore_common_words: true }
    }
}

impl AppConfig {
    /// Full search index database URL.
    pub fn get_database_url(&self) -> String {
        let db_path = Path::new(&self.storage.data_dir).join(&self.search.db_file);
        format!("sqlite:{}?mode=rwc", db_path.to_string_lossy())
    }

    /// Full data directory path.
    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Full uploaded documents directory path.
    pub fn get_uploads_dir(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.uploads_dir)
    }

    /// Server bind address.
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Loads configuration from `path`, writing a default config file on first
/// run.
pub fn load_config(path: &str) -> anyhow::Result<AppConfig> {
    let path = Path::new(path);

    if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    } else {
        let config = AppConfig::default();
        std::fs::write(path, serde_json::to_string_pretty(&config)?)
            .with_context(|| format!("failed to write default config to {}", path.display()))?;
        tracing::info!("created default config file: {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_json() {
        let config = AppConfig::default();
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.search.db_file, config.search.db_file);
        assert!(parsed.search.ignore_common_words);
    }

    #[test]
    fn database_url_points_into_data_dir() {
        let config = AppConfig::default();
        assert_eq!(config.get_database_url(), "sqlite:data/search.db?mode=rwc");
        assert_eq!(config.get_uploads_dir(), PathBuf::from("data/uploads"));
    }
}
