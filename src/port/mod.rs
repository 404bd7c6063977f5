//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the catalog and the outside world. The
//! application layer talks to them; adapters implement them.
//!
//! # Architecture
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │       Application       │
//!                 │  ProjectStore / Intake  │
//!                 └─────────────────────────┘
//!                    │                  │
//!                    ▼                  ▼
//!             ┌─────────────┐    ┌─────────────┐
//!             │  BlobStore  │    │ Invalidator │
//!             │   Adapter   │    │   Adapter   │
//!             └─────────────┘    └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`BlobStore`] - Key/value blob storage holding the records
//! - [`Invalidator`] - Page-cache invalidation after catalog writes

pub mod outbound;

pub use outbound::blob::{Access, BlobDescriptor, BlobEntry, BlobStore, PutOptions};
pub use outbound::invalidation::{CatalogChange, Invalidator};
