//! # Sync Configuration
//!
//! Configuration management for the Drive sync layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SUTRA_DRIVE_URL=https://script.google.com/macros/s/.../exec        │
//! │     SUTRA_SYNC_ENABLED=false                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sutra-billing/sync.toml (Linux)                          │
//! │     ~/Library/Application Support/com.sutra.billing/sync.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Sync disabled until a script URL is provided                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # sync.toml
//! enabled = true
//!
//! [drive]
//! script_url = "https://script.google.com/macros/s/XXXX/exec"
//! folder_root = "Bills"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Drive Settings
// =============================================================================

/// Settings for the Google Drive Apps Script endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveSettings {
    /// The deployed Apps Script web-app URL.
    /// Sync stays disabled while this is empty.
    #[serde(default)]
    pub script_url: String,

    /// Root folder under which invoice PDFs are filed.
    /// Uploads go to `<folder_root>/<YYYY>/<MM>` by invoice date.
    #[serde(default = "default_folder_root")]
    pub folder_root: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_folder_root() -> String {
    "Bills".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for DriveSettings {
    fn default() -> Self {
        DriveSettings {
            script_url: String::new(),
            folder_root: default_folder_root(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Main Sync Configuration
// =============================================================================

/// Complete sync configuration.
///
/// ## Example Config File
/// ```toml
/// enabled = true
///
/// [drive]
/// script_url = "https://script.google.com/macros/s/XXXX/exec"
/// folder_root = "Bills"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Master switch for Drive sync.
    /// Local PDF export works regardless of this flag.
    #[serde(default)]
    pub enabled: bool,

    /// Drive endpoint settings.
    #[serde(default)]
    pub drive: DriveSettings,
}

impl SyncConfig {
    /// Creates a new config with defaults (sync disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sync.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading sync config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load sync config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Sync config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        // An enabled sync needs a usable endpoint
        if self.enabled {
            if self.drive.script_url.is_empty() {
                return Err(SyncError::MissingScriptUrl);
            }
            if !self.drive.script_url.starts_with("https://") {
                return Err(SyncError::InvalidUrl(format!(
                    "Drive script URL must start with https://, got: {}",
                    self.drive.script_url
                )));
            }
        }

        if self.drive.timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // Script URL
        if let Ok(url) = std::env::var("SUTRA_DRIVE_URL") {
            debug!(url = %url, "Overriding Drive script URL from environment");
            self.drive.script_url = url;
        }

        // Master switch
        if let Ok(enabled) = std::env::var("SUTRA_SYNC_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.enabled = true,
                "false" | "0" | "no" => self.enabled = false,
                other => warn!(value = %other, "Unknown SUTRA_SYNC_ENABLED value"),
            }
        }

        // Folder root
        if let Ok(root) = std::env::var("SUTRA_DRIVE_FOLDER") {
            self.drive.folder_root = root;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sutra", "billing").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("sync.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns true if Drive sync is enabled and configured.
    pub fn is_sync_enabled(&self) -> bool {
        self.enabled && !self.drive.script_url.is_empty()
    }

    /// Returns the script URL if configured.
    pub fn script_url(&self) -> Option<&str> {
        if self.drive.script_url.is_empty() {
            None
        } else {
            Some(&self.drive.script_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert!(!config.enabled);
        assert!(!config.is_sync_enabled());
        assert_eq!(config.drive.folder_root, "Bills");
        assert_eq!(config.drive.timeout_secs, 30);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SyncConfig::default();
        assert!(config.validate().is_ok());

        // Enabled without a URL should fail
        config.enabled = true;
        assert!(matches!(
            config.validate().unwrap_err(),
            SyncError::MissingScriptUrl
        ));

        // Plain HTTP should fail
        config.drive.script_url = "http://script.google.com/macros/s/x/exec".to_string();
        assert!(matches!(
            config.validate().unwrap_err(),
            SyncError::InvalidUrl(_)
        ));

        // HTTPS should pass
        config.drive.script_url = "https://script.google.com/macros/s/x/exec".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_requires_url() {
        let mut config = SyncConfig::default();
        config.enabled = true;
        assert!(!config.is_sync_enabled());

        config.drive.script_url = "https://script.google.com/macros/s/x/exec".to_string();
        assert!(config.is_sync_enabled());
    }

    #[test]
    fn test_env_overrides() {
        // The only test touching SUTRA_* vars; restores them before exiting
        // so parallel tests never observe the overrides.
        std::env::set_var("SUTRA_DRIVE_URL", "https://script.google.com/macros/s/env/exec");
        std::env::set_var("SUTRA_SYNC_ENABLED", "yes");
        std::env::set_var("SUTRA_DRIVE_FOLDER", "EnvBills");

        let mut config = SyncConfig::default();
        config.apply_env_overrides();

        std::env::remove_var("SUTRA_DRIVE_URL");
        std::env::remove_var("SUTRA_SYNC_ENABLED");
        std::env::remove_var("SUTRA_DRIVE_FOLDER");

        assert!(config.enabled);
        assert_eq!(
            config.drive.script_url,
            "https://script.google.com/macros/s/env/exec"
        );
        assert_eq!(config.drive.folder_root, "EnvBills");
        assert!(config.validate().is_ok());

        // "0"/"false"/"no" switch sync off; anything else leaves the flag alone
        std::env::set_var("SUTRA_SYNC_ENABLED", "0");
        config.apply_env_overrides();
        std::env::remove_var("SUTRA_SYNC_ENABLED");
        assert!(!config.enabled);

        config.enabled = true;
        std::env::set_var("SUTRA_SYNC_ENABLED", "maybe");
        config.apply_env_overrides();
        std::env::remove_var("SUTRA_SYNC_ENABLED");
        assert!(config.enabled);
    }

    #[test]
    fn test_toml_serialization() {
        let config = SyncConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[drive]"));
        assert!(toml_str.contains("folder_root"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            enabled = true

            [drive]
            script_url = "https://script.google.com/macros/s/abc/exec"
            folder_root = "Invoices"
            timeout_secs = 10
        "#;
        let config: SyncConfig = toml::from_str(toml_str).unwrap();
        assert!(config.enabled);
        assert_eq!(config.drive.folder_root, "Invoices");
        assert_eq!(config.drive.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }
}
