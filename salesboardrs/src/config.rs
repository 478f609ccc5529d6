//! Configuration for the dashboard server.
//!
//! TOML-based, defaults-first: every field has a sensible default so the
//! server runs with no config file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesboardError};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SalesboardConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port the HTTP server binds (default: 4000).
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the DuckDB database file (default: ./sales.duckdb).
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Source CSV for the one-time import. When unset, no import runs and
    /// the store is served as-is.
    pub csv_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 4000 }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./sales.duckdb"),
        }
    }
}

impl SalesboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SalesboardError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| SalesboardError::Config(format!("failed to parse config: {e}")))
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| SalesboardError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations.
    ///
    /// Search order:
    /// 1. `SALESBOARD_CONFIG` environment variable
    /// 2. `./salesboard.toml` (current directory)
    /// 3. `~/.config/salesboard/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("SALESBOARD_CONFIG") {
            if let Ok(cfg) = Self::from_file(&path) {
                tracing::info!(path = %path, "loaded config from SALESBOARD_CONFIG");
                return cfg;
            }
        }

        if let Ok(cfg) = Self::from_file("salesboard.toml") {
            tracing::info!("loaded config from ./salesboard.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("salesboard").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SalesboardConfig::default();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.database.path, PathBuf::from("./sales.duckdb"));
        assert!(cfg.ingest.csv_path.is_none());
    }

    #[test]
    fn parse_toml_overrides() {
        let toml = r#"
[server]
port = 8080

[database]
path = "/var/lib/salesboard/sales.duckdb"

[ingest]
csv_path = "./dataset.csv"
"#;
        let cfg = SalesboardConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(
            cfg.database.path,
            PathBuf::from("/var/lib/salesboard/sales.duckdb")
        );
        assert_eq!(cfg.ingest.csv_path, Some(PathBuf::from("./dataset.csv")));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = SalesboardConfig::from_toml("[server]\nport = 9000\n").unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.path, PathBuf::from("./sales.duckdb"));
    }
}
