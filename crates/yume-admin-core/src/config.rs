//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend location, request policy and the credential
//! backend used to hold the session.
//!
//! Configuration is stored at `~/.config/yume-admin/config.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "yume-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend location.
const DEFAULT_API_BASE_URL: &str = "https://yume-api.bram-jesse.sd-lab.nl/";

/// Path prefix shared by every REST endpoint.
const DEFAULT_API_PREFIX: &str = "api/v1";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Interval between automatic order list refreshes.
const DEFAULT_AUTO_REFRESH_SECS: u64 = 30;

/// Environment variable overriding `api_base_url`.
pub const ENV_API_URL: &str = "YUME_API_URL";

/// Environment variable overriding `refresh_on_forbidden`.
pub const ENV_REFRESH_ON_FORBIDDEN: &str = "YUME_REFRESH_ON_FORBIDDEN";

/// Where session credentials are kept between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    /// `session.json` in the cache directory
    #[default]
    File,
    /// OS keychain
    Keyring,
    /// Process memory only; the session ends with the process
    Memory,
}

impl std::str::FromStr for CredentialBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(CredentialBackend::File),
            "keyring" => Ok(CredentialBackend::Keyring),
            "memory" => Ok(CredentialBackend::Memory),
            other => Err(format!("unknown credential backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub api_prefix: String,
    pub request_timeout_secs: u64,
    /// Treat 403 like 401 and attempt a token refresh. Off by default because
    /// the backend also answers 403 for role denials.
    pub refresh_on_forbidden: bool,
    pub auto_refresh_secs: u64,
    pub credential_backend: CredentialBackend,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            refresh_on_forbidden: false,
            auto_refresh_secs: DEFAULT_AUTO_REFRESH_SECS,
            credential_backend: CredentialBackend::default(),
            last_email: None,
        }
    }
}

impl Config {
    /// Load the config file (or defaults) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Ok(flag) = std::env::var(ENV_REFRESH_ON_FORBIDDEN) {
            if let Some(value) = parse_bool(&flag) {
                self.refresh_on_forbidden = value;
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Root of the server, used to resolve relative asset paths such as dish images.
    pub fn server_root(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    /// Absolute URL for an API path, e.g. `orders/12` becomes
    /// `https://host/api/v1/orders/12`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.server_root();
        let prefix = self.api_prefix.trim().trim_matches('/');
        let path = path.trim().trim_start_matches('/');

        match (base.is_empty(), prefix.is_empty()) {
            (true, true) => path.to_string(),
            (true, false) => format!("{}/{}", prefix, path),
            (false, true) => format!("{}/{}", base, path),
            (false, false) => format!("{}/{}/{}", base, prefix, path),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_prefix_and_path() {
        let config = Config {
            api_base_url: "https://api.example.test/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.endpoint("orders"), "https://api.example.test/api/v1/orders");
        assert_eq!(config.endpoint("/auth/login"), "https://api.example.test/api/v1/auth/login");
    }

    #[test]
    fn test_endpoint_without_prefix() {
        let config = Config {
            api_base_url: "http://127.0.0.1:9000".to_string(),
            api_prefix: String::new(),
            ..Config::default()
        };
        assert_eq!(config.endpoint("dishes/4"), "http://127.0.0.1:9000/dishes/4");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_base_url": "http://x"}"#)
            .expect("partial config parses");
        assert_eq!(config.api_prefix, "api/v1");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.refresh_on_forbidden);
        assert_eq!(config.credential_backend, CredentialBackend::File);
    }

    #[test]
    fn test_credential_backend_from_str() {
        assert_eq!("Keyring".parse::<CredentialBackend>(), Ok(CredentialBackend::Keyring));
        assert_eq!(" memory ".parse::<CredentialBackend>(), Ok(CredentialBackend::Memory));
        assert!("vault".parse::<CredentialBackend>().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
