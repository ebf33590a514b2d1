//! Settings used to create a wallet session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ContextOptions;

/// Directory name used under the platform data directory.
const DATA_DIR_NAME: &str = "wallet-shell";

/// Session creation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// API key presented to the login server.
    pub api_key: Option<String>,
    /// Application identifier.
    pub app_id: String,
    /// Login server URL.
    pub auth_server: Option<String>,
    /// Keep all state in memory instead of on disk.
    pub fake_server: bool,
    /// Root directory for on-disk state.
    pub data_dir: Option<PathBuf>,
}

impl SessionSettings {
    /// Options for the wallet context.
    pub fn context_options(&self) -> ContextOptions {
        ContextOptions {
            api_key: self.api_key.clone(),
            app_id: self.app_id.clone(),
            auth_server: self.auth_server.clone(),
        }
    }

    /// Directory the disk backend should use.
    ///
    /// Falls back to the platform data directory, then to a hidden
    /// directory in the current working directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(DATA_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIR_NAME)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SessionSettings::default();
        assert!(!settings.fake_server);
        assert!(settings.api_key.is_none());
        assert!(settings.app_id.is_empty());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let settings = SessionSettings {
            data_dir: Some(PathBuf::from("/tmp/wallets")),
            ..Default::default()
        };
        assert_eq!(settings.resolved_data_dir(), PathBuf::from("/tmp/wallets"));
    }

    #[test]
    fn test_default_data_dir_named() {
        let dir = SessionSettings::default().resolved_data_dir();
        assert!(dir.to_string_lossy().contains("wallet-shell"));
    }

    #[test]
    fn test_context_options() {
        let settings = SessionSettings {
            api_key: Some("key".into()),
            app_id: "app".into(),
            auth_server: Some("https://auth.example".into()),
            ..Default::default()
        };
        let options = settings.context_options();
        assert_eq!(options.api_key.as_deref(), Some("key"));
        assert_eq!(options.app_id, "app");
        assert_eq!(options.auth_server.as_deref(), Some("https://auth.example"));
    }

    #[test]
    fn test_partial_json() {
        let settings: SessionSettings =
            serde_json::from_str(r#"{ "fake_server": true }"#).unwrap();
        assert!(settings.fake_server);
        assert!(settings.data_dir.is_none());
    }
}
