//! Recording invalidator for signal assertions.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{CatalogChange, Invalidator};

/// Thread-safe collector of invalidation signals.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the store.
#[derive(Clone, Default)]
pub struct RecordingInvalidator {
    changes: Arc<Mutex<Vec<CatalogChange>>>,
    fail: bool,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every signal, then reports it as failed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.changes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.lock().is_empty()
    }

    pub fn changes(&self) -> Vec<CatalogChange> {
        self.changes.lock().clone()
    }
}

#[async_trait]
impl Invalidator for RecordingInvalidator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn invalidate(&self, change: &CatalogChange) -> Result<()> {
        self.changes.lock().push(change.clone());
        if self.fail {
            return Err(Error::Invalidation("recording invalidator set to fail".into()));
        }
        Ok(())
    }
}
