//! Folio - a portfolio project catalog over a remote blob store.
//!
//! Project records are JSON objects stored one per key under a prefix
//! (`projects/<id>.json`). The catalog lists them newest first, skipping
//! records that cannot be read, and writes them with last-writer-wins
//! semantics. Successful writes signal an invalidator so cached pages that
//! render the catalog are regenerated.
//!
//! # Architecture
//!
//! - [`domain`] - The project record, its id, and normalization rules
//! - [`port`] - Outbound traits: [`port::BlobStore`], [`port::Invalidator`]
//! - [`adapter`] - HTTP and in-memory blob stores, invalidators, the CLI
//! - [`application`] - [`application::ProjectStore`] and the admin
//!   [`application::Intake`]
//! - [`infrastructure`] - Configuration loading and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Test doubles and fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use folio::adapter::outbound::blob::MemoryBlobStore;
//! use folio::adapter::outbound::invalidation::NullInvalidator;
//! use folio::application::ProjectStore;
//! use folio::domain::ProjectDraft;
//!
//! # async fn demo() -> folio::error::Result<()> {
//! let store = ProjectStore::new(Arc::new(MemoryBlobStore::new()), Arc::new(NullInvalidator));
//! let outcome = store
//!     .add(ProjectDraft::new("p1", "Folio", "Portfolio catalog"))
//!     .await?;
//! assert!(outcome.is_success());
//! assert_eq!(store.list().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
