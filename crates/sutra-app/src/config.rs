//! # Application Configuration
//!
//! Configuration for the billing application.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Layout                                 │
//! │                                                                         │
//! │  app.toml                                                               │
//! │  ────────                                                               │
//! │  [company]            ← seller identity printed on every invoice       │
//! │  name = "..."                                                           │
//! │  gstin = "..."                                                          │
//! │                                                                         │
//! │  [paths]              ← where data lives                                │
//! │  database = "~/.local/share/sutra-billing/sutra.db"                     │
//! │  export_dir = "~/Documents/Invoices"                                    │
//! │                                                                         │
//! │  The sync side (Drive endpoint) has its own file, sync.toml,           │
//! │  managed by sutra-sync.                                                 │
//! │                                                                         │
//! │  Missing file ⇒ defaults: the bundled company profile and the          │
//! │  platform data directory. First save creates the file.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use sutra_core::CompanyDetails;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// Filesystem locations used by the app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    /// Directory for exported invoice PDFs and CSV backups.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "sutra", "billing")
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("sutra.db"))
        .unwrap_or_else(|| PathBuf::from("./sutra.db"))
}

fn default_export_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from("./exports"))
}

impl Default for PathSettings {
    fn default() -> Self {
        PathSettings {
            database: default_database_path(),
            export_dir: default_export_dir(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seller identity printed on invoices.
    /// Defaults to the bundled company profile.
    #[serde(default)]
    pub company: CompanyDetails,

    /// Filesystem locations.
    #[serde(default)]
    pub paths: PathSettings,
}

impl AppConfig {
    /// Loads configuration from app.toml, falling back to defaults.
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let path = config_path.or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading app config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ApiError::internal(format!("Failed to read config: {}", e)))?;
                let config = toml::from_str(&contents)
                    .map_err(|e| ApiError::internal(format!("Invalid config: {}", e)))?;
                return Ok(config);
            }
            debug!(?path, "App config not found, using defaults");
        }

        Ok(Self::default())
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load app config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiError::internal("No config path available"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::internal(format!("Failed to create config dir: {}", e)))?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ApiError::internal(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&path, contents)
            .map_err(|e| ApiError::internal(format!("Failed to write config: {}", e)))?;

        info!(?path, "App config saved");
        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("app.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_bundled_company() {
        let config = AppConfig::default();
        assert_eq!(config.company.name, "SUSI CORPORATION");
        assert!(config.paths.database.ends_with("sutra.db"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [paths]
            database = "/tmp/custom.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.database, PathBuf::from("/tmp/custom.db"));
        // Untouched sections fall back to defaults
        assert_eq!(config.company.name, "SUSI CORPORATION");
        assert!(config.paths.export_dir.ends_with("exports"));
    }
}
