//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, page size)
    #[serde(default)]
    pub server: catalog_axum::config::AxumConfig,

    /// Database configuration (file location)
    #[serde(default)]
    pub database: catalog_sqlite::config::SqliteConfig,

    /// Token verification settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// How bearer tokens are verified, beyond their signature.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// If set, tokens must carry this `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew tolerated when checking `exp` and `nbf`
    #[serde(default = "default_leeway", with = "humantime_serde")]
    pub leeway: Duration,
}

fn default_leeway() -> Duration {
    Duration::from_secs(15 * 60)
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: None,
            leeway: default_leeway(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep the catalog in a file
    /// export APP_DATABASE__DATABASE_PATH="/data/catalog.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Only accept tokens from one issuer
    /// export APP_AUTH__ISSUER="https://auth.example"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
