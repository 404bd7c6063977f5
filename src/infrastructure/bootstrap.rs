//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::blob::HttpBlobStore;
use crate::adapter::outbound::invalidation::{
    InvalidatorRegistry, LogInvalidator, WebhookInvalidator,
};
use crate::application::ProjectStore;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Build the invalidator registry from configuration.
///
/// Always logs catalog changes; adds the revalidation webhook when enabled.
#[must_use]
pub fn build_invalidator_registry(config: &Config) -> InvalidatorRegistry {
    let mut registry = InvalidatorRegistry::new();
    registry.register(Box::new(LogInvalidator));

    if let Some(webhook) = WebhookInvalidator::from_config(&config.revalidate) {
        info!(paths = ?config.revalidate.paths, "Revalidation webhook enabled");
        registry.register(Box::new(webhook));
    }

    registry
}

/// Build the project store backed by the remote blob API.
///
/// # Errors
///
/// Returns an error if the blob API URL is invalid.
pub fn build_project_store(config: &Config) -> Result<ProjectStore> {
    let blobs = HttpBlobStore::new(&config.blob)?;
    let invalidator = build_invalidator_registry(config);
    Ok(
        ProjectStore::new(Arc::new(blobs), Arc::new(invalidator))
            .with_prefix(config.blob.prefix.clone()),
    )
}
