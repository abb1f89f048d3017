//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend base URL, where the session snapshot is kept,
//! and the request timeout.
//!
//! Configuration is stored at `~/.config/bulletin/config.json`. The
//! `BULLETIN_API_URL` and `BULLETIN_SESSION_STORE` environment variables
//! take precedence over the file.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "bulletin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend used when neither the environment nor the config file names one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "BULLETIN_API_URL";
pub const ENV_SESSION_STORE: &str = "BULLETIN_SESSION_STORE";

/// Where the session snapshot is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionPersistence {
    /// Kept for the life of the process only
    Memory,
    /// OS credential store (the kernel session keyring on Linux)
    #[default]
    Keyring,
    /// JSON file in the cache directory, survives reboots
    File,
}

impl FromStr for SessionPersistence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(SessionPersistence::Memory),
            "keyring" => Ok(SessionPersistence::Keyring),
            "file" => Ok(SessionPersistence::File),
            other => Err(anyhow::anyhow!(
                "Unknown session store '{}' (expected memory, keyring or file)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub session_persistence: SessionPersistence,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto values read from the file.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = Some(url);
            }
        }
        if let Ok(store) = std::env::var(ENV_SESSION_STORE) {
            self.session_persistence = store
                .parse()
                .with_context(|| format!("Invalid {}", ENV_SESSION_STORE))?;
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the session file when `SessionPersistence::File` is used
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_base_url()).with_timeout(Duration::from_secs(
            self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ))
    }
}

/// Resolved settings for `ApiClient`.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
