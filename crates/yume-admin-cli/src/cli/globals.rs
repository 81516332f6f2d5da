use std::sync::Arc;

use anyhow::{Context, Result};
use yume_admin_core::auth::open_store;
use yume_admin_core::config::CredentialBackend;
use yume_admin_core::{Config, SessionClient};

use super::commands::{ARG_API_URL, ARG_CREDENTIAL_BACKEND, ARG_REFRESH_ON_FORBIDDEN};
use super::navigator::TerminalNavigator;

/// Settings shared by every subcommand: the loaded config with command-line
/// overrides applied.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Config,
}

impl GlobalArgs {
    /// # Errors
    /// Returns an error if the config file exists but cannot be read.
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::with_overrides(config, matches))
    }

    fn with_overrides(mut config: Config, matches: &clap::ArgMatches) -> Self {
        if let Some(url) = matches.get_one::<String>(ARG_API_URL) {
            config.api_base_url = url.clone();
        }
        if let Some(backend) = matches
            .get_one::<String>(ARG_CREDENTIAL_BACKEND)
            .and_then(|b| b.parse::<CredentialBackend>().ok())
        {
            config.credential_backend = backend;
        }
        if matches.get_flag(ARG_REFRESH_ON_FORBIDDEN) {
            config.refresh_on_forbidden = true;
        }
        Self { config }
    }

    /// Build a client over the configured credential store, reporting
    /// redirects on the terminal.
    ///
    /// # Errors
    /// Returns an error if the credential store or HTTP client cannot be set up.
    pub fn client(&self) -> Result<SessionClient> {
        let store = open_store(&self.config)?;
        SessionClient::new(self.config.clone(), store, Arc::new(TerminalNavigator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_overrides_from_flags() {
        let matches = commands::new().get_matches_from(vec![
            "yume-admin",
            "--api-url",
            "http://127.0.0.1:9000/",
            "--credential-backend",
            "memory",
            "--refresh-on-forbidden",
            "stats",
        ]);
        let globals = GlobalArgs::with_overrides(Config::default(), &matches);
        assert_eq!(globals.config.api_base_url, "http://127.0.0.1:9000/");
        assert_eq!(globals.config.credential_backend, CredentialBackend::Memory);
        assert!(globals.config.refresh_on_forbidden);
    }

    #[test]
    fn test_defaults_are_kept_without_flags() {
        let matches = commands::new().get_matches_from(vec!["yume-admin", "stats"]);
        let globals = GlobalArgs::with_overrides(Config::default(), &matches);
        assert_eq!(globals.config.api_base_url, Config::default().api_base_url);
        assert!(!globals.config.refresh_on_forbidden);
    }
}
