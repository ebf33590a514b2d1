//! Configuration management for wallet-shell.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;
use crate::session::SessionSettings;

/// Default number of command entries kept in the store.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session creation settings.
    pub wallet: SessionSettings,
    /// Interactive shell settings.
    pub shell: ShellSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Interactive shell section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    /// Prompt printed before each line.
    pub prompt: String,
    /// Maximum number of command entries kept; `null` keeps all.
    pub history_limit: Option<usize>,
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            prompt: "wallet> ".to_string(),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Interpret common spellings of a boolean environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("WALLET_SHELL_API_KEY") {
            if !key.is_empty() {
                self.wallet.api_key = Some(key);
            }
        }

        if let Ok(app_id) = std::env::var("WALLET_SHELL_APP_ID") {
            self.wallet.app_id = app_id;
        }

        if let Ok(server) = std::env::var("WALLET_SHELL_AUTH_SERVER") {
            if !server.is_empty() {
                self.wallet.auth_server = Some(server);
            }
        }

        if let Ok(fake) = std::env::var("WALLET_SHELL_FAKE_SERVER") {
            if let Some(fake) = parse_flag(&fake) {
                self.wallet.fake_server = fake;
            }
        }

        if let Ok(dir) = std::env::var("WALLET_SHELL_DATA_DIR") {
            if !dir.is_empty() {
                self.wallet.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(level) = std::env::var("WALLET_SHELL_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref key) = args.api_key {
            self.wallet.api_key = Some(key.clone());
        }

        if let Some(ref app_id) = args.app_id {
            self.wallet.app_id = app_id.clone();
        }

        if let Some(ref server) = args.auth_server {
            self.wallet.auth_server = Some(server.clone());
        }

        if args.fake_server {
            self.wallet.fake_server = true;
        }

        if let Some(ref dir) = args.data_dir {
            self.wallet.data_dir = Some(dir.clone());
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shell.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "shell.history_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),
    /// JSON parsing error.
    #[error("failed to parse config file: {0}")]
    Json(#[source] serde_json::Error),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
