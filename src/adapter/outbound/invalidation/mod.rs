//! Invalidation adapters.
//!
//! Implements the [`Invalidator`] port for the revalidation webhook, for
//! plain logging, and a registry fanning one signal out to several.

pub mod webhook;

pub use webhook::WebhookInvalidator;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::port::{CatalogChange, Invalidator};

/// Registry of invalidators.
pub struct InvalidatorRegistry {
    invalidators: Vec<Box<dyn Invalidator>>,
}

impl InvalidatorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            invalidators: vec![],
        }
    }

    /// Register an invalidator.
    pub fn register(&mut self, invalidator: Box<dyn Invalidator>) {
        self.invalidators.push(invalidator);
    }

    /// Number of registered invalidators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invalidators.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invalidators.is_empty()
    }
}

impl Default for InvalidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Invalidator for InvalidatorRegistry {
    fn name(&self) -> &'static str {
        "registry"
    }

    /// Signal every registered invalidator, even after one fails.
    /// Returns the first failure.
    async fn invalidate(&self, change: &CatalogChange) -> Result<()> {
        let mut first_error = None;
        for invalidator in &self.invalidators {
            if let Err(e) = invalidator.invalidate(change).await {
                warn!(
                    invalidator = invalidator.name(),
                    id = %change.id(),
                    error = %e,
                    "Invalidation failed"
                );
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// A no-op invalidator for testing or when nothing caches the catalog.
pub struct NullInvalidator;

#[async_trait]
impl Invalidator for NullInvalidator {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn invalidate(&self, _change: &CatalogChange) -> Result<()> {
        Ok(())
    }
}

/// An invalidator that only logs the change via tracing.
pub struct LogInvalidator;

#[async_trait]
impl Invalidator for LogInvalidator {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn invalidate(&self, change: &CatalogChange) -> Result<()> {
        info!(id = %change.id(), reason = change.reason(), "Catalog changed");
        Ok(())
    }
}
