//! Blob store port.
//!
//! A remote key/value blob API reduced to what the catalog needs: list keys
//! under a prefix, read one blob, write one blob, delete one key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// One listed blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    /// Key (pathname) of the blob.
    pub key: String,
    /// URL the content can be downloaded from.
    pub url: String,
    /// Content length in bytes, when the backend reports it.
    pub size: Option<u64>,
    /// Upload time, when the backend reports it.
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobDescriptor {
    /// Key the blob was stored under.
    pub key: String,
    /// URL the content can be downloaded from.
    pub url: String,
    /// Content type recorded by the backend.
    pub content_type: Option<String>,
}

/// Visibility of a written blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    /// Readable by anyone holding the URL.
    #[default]
    Public,
}

impl Access {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
        }
    }
}

/// Write options for [`BlobStore::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: String,
    pub access: Access,
}

impl PutOptions {
    /// Public JSON document.
    #[must_use]
    pub fn json() -> Self {
        Self {
            content_type: "application/json".to_string(),
            access: Access::Public,
        }
    }
}

/// Key/value blob storage.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `put` overwrites an existing key; there is no conditional write
/// - `delete` of a missing key is not an error
/// - A missing access credential is reported as
///   [`StoreError::Unconfigured`](crate::error::StoreError::Unconfigured)
///   before any request is made
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Return the backend name for logging.
    fn name(&self) -> &'static str;

    /// List every blob whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<BlobEntry>>;

    /// Download a listed blob. Returns `None` when it no longer exists.
    async fn fetch(&self, entry: &BlobEntry) -> Result<Option<Vec<u8>>>;

    /// Store `body` under `key`, replacing any existing blob.
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<BlobDescriptor>;

    /// Remove the blob stored under `key`.
    async fn delete(&self, key: &str) -> Result<()>;
}
