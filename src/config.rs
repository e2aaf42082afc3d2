//! Configuration file handling.
//!
//! This module loads the notifier settings from `config.json` (or a
//! `.toml` file) once at startup. A file that cannot be read or parsed is
//! not fatal: the notifier keeps running with empty settings.

use crate::error::ConfigError;
use crate::policy::resolve_cooldown;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rocket.Chat server base address.
    #[serde(default)]
    pub rocket_api_url: String,

    /// Rocket.Chat user id sent as `X-User-Id`.
    #[serde(default)]
    pub rocket_api_user: String,

    /// Rocket.Chat personal access token sent as `X-Auth-Token`.
    #[serde(default)]
    pub rocket_api_token: String,

    /// Telegram bot token.
    #[serde(default)]
    pub tg_api_token: String,

    /// Telegram chat that receives the digests.
    #[serde(default)]
    pub tg_chat_id: String,

    /// Minimum seconds between two notifications. `0` or less means default.
    #[serde(default)]
    pub renotify_seconds: i64,

    /// Telegram Bot API host.
    #[serde(default = "default_tg_api_url")]
    pub tg_api_url: String,

    /// Seconds to sleep between cycles. `0` or less means default.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: i64,

    /// Per-request timeout in seconds. `0` or less means default.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rocket_api_url: String::new(),
            rocket_api_user: String::new(),
            rocket_api_token: String::new(),
            tg_api_token: String::new(),
            tg_chat_id: String::new(),
            renotify_seconds: 0,
            tg_api_url: default_tg_api_url(),
            poll_interval_seconds: default_poll_interval(),
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

fn default_tg_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_interval() -> i64 {
    30
}

fn default_http_timeout() -> i64 {
    5
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load configuration, falling back to empty settings on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; continuing with empty configuration", e);
                Self::default()
            }
        }
    }

    /// Cooldown between notifications, in seconds.
    pub fn renotify_cooldown_secs(&self) -> u64 {
        resolve_cooldown(Some(self.renotify_seconds))
    }

    /// Sleep between two cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(positive_or(self.poll_interval_seconds, default_poll_interval()))
    }

    /// Timeout applied to every HTTP request.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(positive_or(self.http_timeout_seconds, default_http_timeout()))
    }
}

fn positive_or(value: i64, fallback: i64) -> u64 {
    if value > 0 {
        value.unsigned_abs()
    } else {
        fallback.unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rocket_api_url.is_empty());
        assert_eq!(config.renotify_cooldown_secs(), 3600);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
        assert_eq!(config.tg_api_url, "https://api.telegram.org");
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{
            "rocket_api_url": "https://chat.example.com",
            "rocket_api_user": "user-1",
            "rocket_api_token": "secret",
            "tg_api_token": "123:abc",
            "tg_chat_id": "-1001",
            "renotify_seconds": 600
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.rocket_api_url, "https://chat.example.com");
        assert_eq!(config.rocket_api_user, "user-1");
        assert_eq!(config.tg_chat_id, "-1001");
        assert_eq!(config.renotify_cooldown_secs(), 600);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_or_missing_renotify_uses_default() {
        let zero: Config = serde_json::from_str(r#"{"renotify_seconds": 0}"#).unwrap();
        assert_eq!(zero.renotify_cooldown_secs(), 3600);

        let missing: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.renotify_cooldown_secs(), 3600);
    }

    #[test]
    fn test_negative_values_use_defaults_and_keep_other_fields() {
        let config: Config = serde_json::from_str(
            r#"{
                "rocket_api_url": "https://chat.example.com",
                "tg_chat_id": "-1001",
                "renotify_seconds": -1,
                "poll_interval_seconds": -30,
                "http_timeout_seconds": -5
            }"#,
        )
        .unwrap();
        assert_eq!(config.rocket_api_url, "https://chat.example.com");
        assert_eq!(config.tg_chat_id, "-1001");
        assert_eq!(config.renotify_cooldown_secs(), 3600);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_intervals_use_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"poll_interval_seconds": 0, "http_timeout_seconds": 0}"#)
                .unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "rocket_api_url = \"https://chat.example.com\"\ntg_chat_id = \"42\"\nrenotify_seconds = 90"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rocket_api_url, "https://chat.example.com");
        assert_eq!(config.tg_chat_id, "42");
        assert_eq!(config.renotify_cooldown_secs(), 90);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"tg_api_token": "t", "poll_interval_seconds": 10}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tg_api_token, "t");
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.json"));
        assert_eq!(config, Config::default());
    }
}
