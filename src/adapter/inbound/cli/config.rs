//! Handler for the `config` command group.

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use crate::adapter::inbound::cli::output::{self, Tone};
use crate::error::Result;
use crate::infrastructure::config::blob::BLOB_TOKEN_ENV;
use crate::infrastructure::config::revalidate::REVALIDATE_SECRET_ENV;
use crate::infrastructure::config::settings::Config;

fn source_label(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    }
}

/// Execute `config show`.
///
/// Secrets are reported as present or missing, never printed.
pub fn execute_show(config: &Config, path: &Path) -> Result<ExitCode> {
    if output::is_json() {
        output::document(json!({
            "command": "config.show",
            "source": source_label(path),
            "config": config,
            "secrets": {
                BLOB_TOKEN_ENV: config.blob.has_token(),
                REVALIDATE_SECRET_ENV: config.revalidate.secret.is_some(),
            },
        }));
        return Ok(ExitCode::SUCCESS);
    }

    output::heading("Effective Configuration");
    output::field("Source", source_label(path));

    output::heading("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::heading("Blob Store");
    output::field("API", &config.blob.api_url);
    output::field("Version", &config.blob.api_version);
    output::field("Prefix", &config.blob.prefix);
    if config.blob.has_token() {
        output::status(Tone::Ok, &format!("Token loaded from {BLOB_TOKEN_ENV}"));
    } else {
        output::status(Tone::Warn, &format!("Token not set ({BLOB_TOKEN_ENV})"));
    }

    output::heading("Revalidation");
    if config.revalidate.enabled {
        output::field("Webhook", config.revalidate.url.as_deref().unwrap_or("-"));
        output::field("Paths", config.revalidate.paths.join(", "));
        output::field(
            "Secret",
            if config.revalidate.secret.is_some() {
                "set"
            } else {
                "not set"
            },
        );
    } else {
        output::field("Webhook", "disabled");
    }

    Ok(ExitCode::SUCCESS)
}

/// Execute `config validate`.
///
/// Parsing and validation already happened while loading; this reports
/// the result and what is still missing at runtime.
pub fn execute_validate(config: &Config, path: &Path) -> Result<ExitCode> {
    if output::is_json() {
        output::document(json!({
            "command": "config.validate",
            "source": source_label(path),
            "valid": true,
            "token_present": config.blob.has_token(),
        }));
        return Ok(ExitCode::SUCCESS);
    }

    output::heading("Configuration Check");
    output::field("Config", source_label(path));
    output::status(Tone::Ok, "Configuration is valid");

    if !config.blob.has_token() {
        output::status(
            Tone::Warn,
            &format!("{BLOB_TOKEN_ENV} is not set; writes will be refused"),
        );
    }
    if config.revalidate.enabled && config.revalidate.secret.is_none() {
        output::note(&format!(
            "{REVALIDATE_SECRET_ENV} is not set; the webhook is called without auth"
        ));
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_label_marks_missing_files() {
        let label = source_label(Path::new("/definitely/not/here/folio.toml"));
        assert!(label.ends_with("(not found, using defaults)"));
    }
}
