//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from an optional TOML file with environment
//! variable overrides for secrets like `BLOB_READ_WRITE_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use folio::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("folio.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use super::blob::{BlobConfig, BLOB_TOKEN_ENV};
use super::logging::LoggingConfig;
use super::revalidate::{RevalidateConfig, REVALIDATE_SECRET_ENV};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section has defaults, so an empty file (or no file at all, see
/// [`Config::load_optional`]) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote blob API settings.
    #[serde(default)]
    pub blob: BlobConfig,

    /// Page-cache revalidation webhook.
    #[serde(default)]
    pub revalidate: RevalidateConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads secrets from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |name| std::env::var(name).ok())
    }

    /// Parse configuration from TOML content, resolving secrets via `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets come from the environment only, never from the file.
        config.blob.token = env(BLOB_TOKEN_ENV).filter(|v| !v.trim().is_empty());
        config.revalidate.secret = env(REVALIDATE_SECRET_ENV).filter(|v| !v.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file when it exists, otherwise use defaults plus environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.blob.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if let Err(e) = Url::parse(&self.blob.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.blob.api_version.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_version",
            }
            .into());
        }
        if self.blob.prefix.is_empty() || !self.blob.prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: "must be non-empty and end with '/'".to_string(),
            }
            .into());
        }
        if self.blob.prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: "must not start with '/'".to_string(),
            }
            .into());
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "format",
                    reason: format!("unknown log format '{other}' (expected pretty or json)"),
                }
                .into())
            }
        }

        if self.revalidate.enabled {
            let Some(url) = self.revalidate.url.as_deref() else {
                return Err(ConfigError::MissingField {
                    field: "revalidate.url",
                }
                .into());
            };
            if let Err(e) = Url::parse(url) {
                return Err(ConfigError::InvalidValue {
                    field: "revalidate.url",
                    reason: e.to_string(),
                }
                .into());
            }
            if self.revalidate.paths.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "revalidate.paths",
                    reason: "at least one path is required".to_string(),
                }
                .into());
            }
            if let Some(path) = self.revalidate.paths.iter().find(|p| !p.starts_with('/')) {
                return Err(ConfigError::InvalidValue {
                    field: "revalidate.paths",
                    reason: format!("'{path}' must start with '/'"),
                }
                .into());
            }
        }

        Ok(())
    }
}
