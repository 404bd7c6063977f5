//! Builders for domain values used across tests.
//!
//! Keeps tests focused on assertions rather than construction boilerplate.

use crate::adapter::outbound::blob::MemoryBlobStore;
use crate::domain::{ProjectDraft, ProjectId};
use crate::infrastructure::config::blob::DEFAULT_PREFIX;
use crate::port::{BlobStore, PutOptions};

/// A valid draft with id `id` and a title derived from it.
pub fn draft(id: &str) -> ProjectDraft {
    ProjectDraft::new(id, format!("Project {id}"), format!("Description of {id}"))
}

/// Write raw bytes under the record key for `id`, bypassing validation.
pub async fn seed_raw(blobs: &MemoryBlobStore, id: &str, body: &str) {
    blobs
        .put(
            &ProjectId::new(id).key(DEFAULT_PREFIX),
            body.as_bytes().to_vec(),
            &PutOptions::json(),
        )
        .await
        .expect("seed raw record");
}
