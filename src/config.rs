//! Configuration Management
//!
//! Handles persistent configuration storage for cfsummary. Access tokens
//! are never written to disk.

use crate::cloudcontroller::ClientConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the configured API endpoint
pub const API_ENV: &str = "CF_API";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Cloud Controller API endpoint
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub skip_ssl_validation: bool,
    /// Connect timeout in seconds
    #[serde(default)]
    pub dial_timeout_secs: Option<u64>,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cfsummary").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::require_path(Self::config_path())?;
        self.save_to(&path)
    }

    fn require_path(path: Option<PathBuf>) -> Result<PathBuf> {
        path.context("No config directory available on this system; nothing was saved")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective API endpoint (CLI > CF_API > config)
    pub fn effective_target(&self, cli: Option<&str>, binary_name: &str) -> Result<String> {
        cli.map(str::to_string)
            .or_else(|| std::env::var(API_ENV).ok())
            .or_else(|| self.target.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API endpoint set. Use '{} --api <URL>' or set {} to target a Cloud Controller.",
                    binary_name,
                    API_ENV
                )
            })
    }

    /// Set target and save
    pub fn set_target(&mut self, target: &str) -> Result<()> {
        self.target = Some(target.to_string());
        self.save()
    }

    /// Build client settings for `target`
    pub fn client_config(&self, target: &str, access_token: Option<&str>) -> ClientConfig {
        let mut config = ClientConfig::new(target);
        config.access_token = access_token.map(str::to_string);
        config.skip_ssl_validation = self.skip_ssl_validation;
        if let Some(secs) = self.dial_timeout_secs {
            config.dial_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_target_wins() {
        let config = Config {
            target: Some("https://from-config".to_string()),
            ..Config::default()
        };
        let target = config
            .effective_target(Some("https://from-cli"), "cfsummary")
            .unwrap();
        assert_eq!(target, "https://from-cli");
    }

    #[test]
    fn test_missing_target_names_binary() {
        let config = Config::default();
        if std::env::var(API_ENV).is_ok() {
            return;
        }
        let err = config.effective_target(None, "faceman").unwrap_err();
        assert!(err.to_string().contains("faceman --api"));
    }

    #[test]
    fn test_client_config_applies_timeouts() {
        let config = Config {
            skip_ssl_validation: true,
            dial_timeout_secs: Some(1),
            request_timeout_secs: Some(30),
            ..Config::default()
        };
        let client = config.client_config("https://api.example.com", Some("token"));
        assert!(client.skip_ssl_validation);
        assert_eq!(client.dial_timeout, Duration::from_secs(1));
        assert_eq!(client.request_timeout, Duration::from_secs(30));
        assert_eq!(client.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_save_without_config_dir_fails() {
        let err = Config::require_path(None).unwrap_err();
        assert!(err.to_string().contains("No config directory"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/cfsummary/config.json"));
        assert_eq!(config, Config::default());
    }
}
