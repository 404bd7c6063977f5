//! Store fixtures shared by the catalog and intake tests.

use std::sync::Arc;

use folio::adapter::outbound::blob::MemoryBlobStore;
use folio::application::ProjectStore;
use folio::testkit::blob::FaultyBlobStore;
use folio::testkit::invalidation::RecordingInvalidator;

/// A store over in-memory blobs, with handles to inspect both sides.
pub struct Fixture {
    pub blobs: Arc<FaultyBlobStore>,
    pub invalidator: Arc<RecordingInvalidator>,
    pub store: Arc<ProjectStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::over(Arc::new(MemoryBlobStore::new()))
    }

    /// Fixture whose backend has no credential.
    pub fn unconfigured() -> Self {
        Self::over(Arc::new(MemoryBlobStore::unconfigured()))
    }

    fn over(memory: Arc<MemoryBlobStore>) -> Self {
        let blobs = Arc::new(FaultyBlobStore::wrap(memory));
        let invalidator = Arc::new(RecordingInvalidator::new());
        let store = Arc::new(ProjectStore::new(blobs.clone(), invalidator.clone()));
        Self {
            blobs,
            invalidator,
            store,
        }
    }

    pub fn memory(&self) -> &MemoryBlobStore {
        self.blobs.inner()
    }
}
