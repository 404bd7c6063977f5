//! Invalidation port.
//!
//! Pages rendered from the catalog are cached by the hosting framework.
//! After every successful write the catalog tells an [`Invalidator`] so the
//! cached output is regenerated on the next request.

use async_trait::async_trait;

use crate::domain::ProjectId;
use crate::error::Result;

/// A landed change to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    /// A record was written (created or overwritten).
    Added { id: ProjectId },
    /// A record was deleted.
    Removed { id: ProjectId },
}

impl CatalogChange {
    /// The affected project.
    #[must_use]
    pub fn id(&self) -> &ProjectId {
        match self {
            Self::Added { id } | Self::Removed { id } => id,
        }
    }

    /// Short machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
        }
    }
}

/// Receiver of catalog invalidation signals.
#[async_trait]
pub trait Invalidator: Send + Sync {
    /// Return the invalidator name for logging.
    fn name(&self) -> &'static str;

    /// Mark views depending on the catalog as stale.
    ///
    /// # Errors
    ///
    /// Returns an error when the signal could not be delivered. The write it
    /// follows has already landed either way.
    async fn invalidate(&self, change: &CatalogChange) -> Result<()>;
}
