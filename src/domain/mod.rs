//! Catalog domain: the project record, its id and per-record errors.

pub mod error;
pub mod id;
pub mod project;

pub use error::RecordError;
pub use id::ProjectId;
pub use project::{sort_newest_first, ParseFailure, Project, ProjectDraft, PLACEHOLDER_IMAGE};
