//! Blob store with injectable failures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::adapter::outbound::blob::MemoryBlobStore;
use crate::error::{Result, StoreError};
use crate::port::{BlobDescriptor, BlobEntry, BlobStore, PutOptions};

/// Wraps a [`MemoryBlobStore`], failing chosen calls.
#[derive(Default)]
pub struct FaultyBlobStore {
    inner: Arc<MemoryBlobStore>,
    failing_fetches: Mutex<HashSet<String>>,
    fail_list: AtomicBool,
    fail_writes: AtomicBool,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl FaultyBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing memory store.
    pub fn wrap(inner: Arc<MemoryBlobStore>) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &Arc<MemoryBlobStore> {
        &self.inner
    }

    /// Make fetching `key` fail with a network error.
    pub fn fail_fetch(&self, key: &str) {
        self.failing_fetches.lock().insert(key.to_string());
    }

    /// Make listing fail as if the backend were unreachable.
    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Make put and delete fail with an error status.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of put calls that reached the backend.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of delete calls that reached the backend.
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn write_fault(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                context: key.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FaultyBlobStore {
    fn name(&self) -> &'static str {
        "faulty"
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobEntry>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()).into());
        }
        self.inner.list(prefix).await
    }

    async fn fetch(&self, entry: &BlobEntry) -> Result<Option<Vec<u8>>> {
        if self.failing_fetches.lock().contains(&entry.key) {
            return Err(StoreError::Unavailable(format!("fetch {} timed out", entry.key)).into());
        }
        self.inner.fetch(entry).await
    }

    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<BlobDescriptor> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.write_fault(key)?;
        self.inner.put(key, body, options).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.write_fault(key)?;
        self.inner.delete(key).await
    }
}
