//! Blob store adapters.
//!
//! Implements the [`BlobStore`](crate::port::BlobStore) port for the remote
//! blob API and for an in-process map.

pub mod http;
pub mod memory;

pub use http::HttpBlobStore;
pub use memory::MemoryBlobStore;
