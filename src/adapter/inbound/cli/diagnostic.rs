//! Miette-based error diagnostics for CLI error presentation.
//!
//! Provides rich error types with source code context, labels, and help
//! suggestions for improved user experience when errors occur.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as SettingsError, Error, StoreError};

/// Configuration error with source location context.
///
/// Displays the configuration file content with a labeled span pointing
/// to the problematic location, along with an optional help message.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(folio::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (typically the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Error without a source location.
///
/// Reports a missing credential, a failing backend, or a configuration
/// problem that cannot be pointed at, with a help suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(folio::operation))]
pub struct OperationError {
    /// Human-readable error message.
    pub message: String,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl OperationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Convert a crate error into a rendered report.
///
/// Configuration errors are pointed at the offending line of
/// `config_path` when the file can be read back.
pub fn report(error: Error, config_path: &Path) -> miette::Report {
    match error {
        Error::Config(e) => config_report(e, config_path),
        Error::Store(StoreError::Unconfigured { credential }) => miette::Report::new(
            OperationError::new(format!(
                "blob store is not configured: {credential} is not set"
            ))
            .with_help(format!(
                "set {credential} in the environment or in a .env file"
            )),
        ),
        Error::Store(e @ (StoreError::Unavailable(_) | StoreError::Status { .. })) => {
            miette::Report::new(
                OperationError::new(e.to_string())
                    .with_help("check your network connection and the blob API URL"),
            )
        }
        other => miette::miette!("{other}"),
    }
}

fn config_report(error: SettingsError, config_path: &Path) -> miette::Report {
    let src = std::fs::read_to_string(config_path).unwrap_or_default();

    let (span, help) = match &error {
        SettingsError::Parse(e) => (
            e.span()
                .filter(|_| !src.is_empty())
                .map(|span| (span.start, span.len())),
            format!("check the TOML syntax of {}", config_path.display()),
        ),
        SettingsError::InvalidValue { field, .. } | SettingsError::MissingField { field } => (
            find_key(&src, field.rsplit_once('.').map_or(*field, |(_, key)| key)),
            format!("fix `{field}` in {}", config_path.display()),
        ),
        SettingsError::ReadFile(_) => (
            None,
            format!("check that {} is readable", config_path.display()),
        ),
    };

    let message = match &error {
        SettingsError::Parse(e) => e.message().to_string(),
        other => other.to_string(),
    };

    match span {
        Some((offset, len)) => {
            miette::Report::new(ConfigError::new(message, src, offset, len).with_help(help))
        }
        None => miette::Report::new(OperationError::new(message).with_help(help)),
    }
}

/// Locate `key = ...` in TOML source, returning the key's offset and length.
fn find_key(src: &str, key: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                let indent = line.len() - trimmed.len();
                return Some((offset + indent, key.len()));
            }
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_key_points_at_the_key() {
        let src = "[blob]\nprefix = \"projects\"\n";
        let (offset, len) = find_key(src, "prefix").unwrap();
        assert_eq!(&src[offset..offset + len], "prefix");
    }

    #[test]
    fn find_key_ignores_keys_sharing_a_prefix() {
        let src = "[blob]\nprefix_extra = 1\n";
        assert!(find_key(src, "prefix").is_none());
    }

    #[test]
    fn unconfigured_report_suggests_setting_the_token() {
        let report = report(
            StoreError::Unconfigured {
                credential: "BLOB_READ_WRITE_TOKEN",
            }
            .into(),
            Path::new("missing.toml"),
        );
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("BLOB_READ_WRITE_TOKEN"));
    }

    #[test]
    fn config_error_with_help() {
        let err = ConfigError::new("bad value", "a = 1", 0, 1).with_help("try again");
        assert_eq!(err.help.as_deref(), Some("try again"));
        assert_eq!(err.to_string(), "bad value");
    }
}
