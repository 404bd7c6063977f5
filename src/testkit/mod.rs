//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`blob`] - `FaultyBlobStore`, a memory store with injectable failures.
//! - [`invalidation`] - `RecordingInvalidator` for asserting signals.
//! - [`domain`] - Builders for drafts and raw stored records.
//! - [`config`] - Canonical test configurations.

pub mod blob;
pub mod config;
pub mod domain;
pub mod invalidation;
