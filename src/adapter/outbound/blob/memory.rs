//! In-memory blob store.
//!
//! Backs tests and offline runs. Values are replaced whole under a write
//! lock, so concurrent writers to one key leave exactly one of their blobs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::{Result, StoreError};
use crate::infrastructure::config::blob::BLOB_TOKEN_ENV;
use crate::port::{BlobDescriptor, BlobEntry, BlobStore, PutOptions};

/// URL scheme of blobs held by [`MemoryBlobStore`].
const URL_SCHEME: &str = "memory://";

#[derive(Debug, Clone)]
struct StoredBlob {
    body: Vec<u8>,
    content_type: String,
    uploaded_at: DateTime<Utc>,
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, StoredBlob>>,
    unconfigured: bool,
}

impl MemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that behaves as if its access token were missing.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            blobs: RwLock::default(),
            unconfigured: true,
        }
    }

    /// Number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Check if the store holds no blobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Raw content stored under `key`.
    #[must_use]
    pub fn read(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(key).map(|b| b.body.clone())
    }

    /// Content type recorded for `key`.
    #[must_use]
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs.read().get(key).map(|b| b.content_type.clone())
    }

    fn check_configured(&self) -> Result<()> {
        if self.unconfigured {
            return Err(StoreError::Unconfigured {
                credential: BLOB_TOKEN_ENV,
            }
            .into());
        }
        Ok(())
    }
}

fn url_for(key: &str) -> String {
    format!("{URL_SCHEME}{key}")
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobEntry>> {
        self.check_configured()?;
        Ok(self
            .blobs
            .read()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, blob)| BlobEntry {
                key: key.clone(),
                url: url_for(key),
                size: Some(blob.body.len() as u64),
                uploaded_at: Some(blob.uploaded_at),
            })
            .collect())
    }

    async fn fetch(&self, entry: &BlobEntry) -> Result<Option<Vec<u8>>> {
        let key = entry.url.strip_prefix(URL_SCHEME).unwrap_or(&entry.key);
        Ok(self.read(key))
    }

    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<BlobDescriptor> {
        self.check_configured()?;
        self.blobs.write().insert(
            key.to_string(),
            StoredBlob {
                body,
                content_type: options.content_type.clone(),
                uploaded_at: Utc::now(),
            },
        );
        Ok(BlobDescriptor {
            key: key.to_string(),
            url: url_for(key),
            content_type: Some(options.content_type.clone()),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check_configured()?;
        self.blobs.write().remove(key);
        Ok(())
    }
}
