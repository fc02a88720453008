//! Configuration management module.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::storage::crypto::BASE64_KEY_PREFIX;

/// Disk whose files are served without authentication.
pub const PUBLIC_DISK: &str = "public";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Default disk name (default: "public").
    #[serde(default = "default_disk")]
    pub default_disk: String,
    /// Base URL that stored files are served from.
    pub asset_url: String,
    /// Local directory backing the disk.
    pub root: PathBuf,
    /// Directory of profile photos, relative to the disk root.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,
    /// Check that profile photos exist before building their URL.
    #[serde(default)]
    pub verify_exists: bool,
}

fn default_disk() -> String {
    PUBLIC_DISK.to_string()
}

fn default_profile_dir() -> String {
    "EMPLOYEE/PROFILE".to_string()
}

/// Secrets used for filename encryption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub app_key: String,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Write daily rolling log files here when set.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.default_disk.trim().is_empty() {
            return Err(ConfigError::Validation("Default disk cannot be empty".to_string()));
        }
        match Url::parse(&self.storage.asset_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::Validation(
                    "Asset URL must start with http:// or https://".to_string(),
                ));
            }
        }
        if self.storage.profile_dir.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation("Profile directory cannot be empty".to_string()));
        }
        if self.storage.is_public() && self.security.app_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "App key is required when the default disk is public".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("Log level cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl StorageConfig {
    /// Whether the default disk serves files publicly.
    pub fn is_public(&self) -> bool {
        self.default_disk == PUBLIC_DISK
    }
}

impl SecurityConfig {
    /// Security settings with a freshly generated `base64:` app key.
    pub fn generate() -> Self {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self {
            app_key: format!("{BASE64_KEY_PREFIX}{}", STANDARD.encode(secret)),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_disk: default_disk(),
            asset_url: "http://localhost/storage/".to_string(),
            root: PathBuf::from("storage/app/public"),
            profile_dir: default_profile_dir(),
            verify_exists: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
