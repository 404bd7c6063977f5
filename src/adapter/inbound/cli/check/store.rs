//! Handler for `check store`.
//!
//! Exits 1 when the credential is missing; a failed listing is returned as
//! an error so `main` renders it as a diagnostic.

use std::process::ExitCode;

use serde_json::json;

use crate::adapter::inbound::cli::output::{self, Tone};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::blob::BLOB_TOKEN_ENV;
use crate::infrastructure::config::settings::Config;

/// Verify the blob credential and that the catalog can be listed.
pub async fn execute_store(config: &Config) -> Result<ExitCode> {
    let store = bootstrap::build_project_store(config)?;

    if !output::is_json() {
        output::heading("Blob Store Check");
        output::field("API", &config.blob.api_url);
        output::field("Prefix", store.prefix());
    }

    if !config.blob.has_token() {
        output::status(Tone::Fail, &format!("{BLOB_TOKEN_ENV} is not set"));
        output::hint(&format!(
            "set {BLOB_TOKEN_ENV} in the environment or a .env file"
        ));
        return Ok(ExitCode::FAILURE);
    }
    output::status(Tone::Ok, &format!("{BLOB_TOKEN_ENV} is set"));

    let pb = output::spinner("Listing projects...");
    let projects = match store.list().await {
        Ok(projects) => {
            output::finish(&pb, Tone::Ok, "Catalog reachable");
            projects
        }
        Err(e) => {
            output::finish(&pb, Tone::Fail, "Catalog listing failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::document(json!({
            "command": "check.store",
            "ok": true,
            "projects": projects.len(),
        }));
    } else {
        output::field("Projects", projects.len());
        output::status(Tone::Ok, "Blob store checks passed");
    }

    Ok(ExitCode::SUCCESS)
}
