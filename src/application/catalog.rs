//! The project catalog store.
//!
//! A facade over a [`BlobStore`]: every record lives under
//! `<prefix><id>.json`. Writes are last-writer-wins with no version check.
//! Listings are best-effort: a record that cannot be fetched or parsed is
//! logged and left out, and only a failure of the listing itself is an
//! error.

use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, error, info, warn};

use crate::domain::{
    sort_newest_first, ParseFailure, Project, ProjectDraft, ProjectId, RecordError,
};
use crate::error::{Error, Result, StoreError, ValidationError};
use crate::infrastructure::config::blob::DEFAULT_PREFIX;
use crate::port::{BlobEntry, BlobStore, CatalogChange, Invalidator, PutOptions};

/// Why a write was refused without touching the backend's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The record failed validation; nothing was written.
    Invalid(ValidationError),
    /// The blob credential is missing.
    Unconfigured { credential: &'static str },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "{e}"),
            Self::Unconfigured { credential } => {
                write!(f, "blob store is not configured: {credential} is not set")
            }
        }
    }
}

/// Result of [`ProjectStore::add`] or [`ProjectStore::delete`].
///
/// Expected failures come back as [`WriteOutcome::Rejected`]; callers must
/// check [`WriteOutcome::is_success`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum WriteOutcome {
    Applied { id: String },
    Rejected { id: String, reason: Rejection },
}

impl WriteOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Id of the affected record, as supplied by the caller.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Applied { id } | Self::Rejected { id, .. } => id,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied { .. } => None,
            Self::Rejected { reason, .. } => Some(reason),
        }
    }
}

/// Stores and retrieves project records in a blob store.
pub struct ProjectStore {
    blobs: Arc<dyn BlobStore>,
    invalidator: Arc<dyn Invalidator>,
    prefix: String,
}

impl ProjectStore {
    /// Create a store keeping records under the default `projects/` prefix.
    pub fn new(blobs: Arc<dyn BlobStore>, invalidator: Arc<dyn Invalidator>) -> Self {
        Self {
            blobs,
            invalidator,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Use a different key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Blob key of the record with `id`.
    #[must_use]
    pub fn key_for(&self, id: &ProjectId) -> String {
        id.key(&self.prefix)
    }

    /// List every well-formed project, newest id first.
    ///
    /// Records are fetched concurrently. Individual fetch or parse failures
    /// are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unconfigured`] when the credential is missing
    /// and [`StoreError::Unavailable`] or [`StoreError::Status`] when the
    /// listing itself fails.
    pub async fn list(&self) -> Result<Vec<Project>> {
        let mut entries = self.blobs.list(&self.prefix).await?;
        entries.retain(|entry| {
            let is_record = ProjectId::from_key(&entry.key, &self.prefix).is_some();
            if !is_record {
                debug!(key = %entry.key, "Ignoring non-record blob");
            }
            is_record
        });
        if entries.is_empty() {
            debug!(prefix = %self.prefix, "Catalog is empty");
            return Ok(Vec::new());
        }

        let reads = join_all(entries.iter().map(|entry| self.read_record(entry))).await;

        let mut projects = Vec::with_capacity(reads.len());
        for read in reads {
            match read {
                Ok(project) => projects.push(project),
                Err(e) => warn!(key = %e.key(), error = %e, "Skipping unreadable project record"),
            }
        }

        sort_newest_first(&mut projects);
        debug!(
            listed = entries.len(),
            returned = projects.len(),
            "Listed projects"
        );
        Ok(projects)
    }

    /// Like [`ProjectStore::list`], but a failed listing yields no projects.
    pub async fn list_or_empty(&self) -> Vec<Project> {
        match self.list().await {
            Ok(projects) => projects,
            Err(e) => {
                error!(error = %e, "Failed to list projects");
                Vec::new()
            }
        }
    }

    /// Fetch a single project.
    ///
    /// Returns `None` when no record exists, the stored record is malformed,
    /// or `id` cannot name a record.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectStore::list`].
    pub async fn get(&self, id: &ProjectId) -> Result<Option<Project>> {
        if ProjectId::parse(id.as_str()).is_err() {
            debug!(id = %id, "Not a record id");
            return Ok(None);
        }
        let key = self.key_for(id);
        let entries = self.blobs.list(&key).await?;
        let Some(entry) = entries.into_iter().find(|e| e.key == key) else {
            return Ok(None);
        };

        match self.read_record(&entry).await {
            Ok(project) => Ok(Some(project)),
            Err(e) => {
                warn!(key = %e.key(), error = %e, "Unreadable project record");
                Ok(None)
            }
        }
    }

    /// Validate, normalize and write a project.
    ///
    /// An existing record with the same id is overwritten.
    ///
    /// # Errors
    ///
    /// Only for unexpected backend faults. Validation failures and a missing
    /// credential are reported as [`WriteOutcome::Rejected`].
    pub async fn add(&self, draft: ProjectDraft) -> Result<WriteOutcome> {
        let id = draft.id_hint().to_string();
        let project = match draft.normalize() {
            Ok(project) => project,
            Err(e) => {
                info!(id = %id, field = e.field, "Rejected invalid project");
                return Ok(WriteOutcome::Rejected {
                    id,
                    reason: Rejection::Invalid(e),
                });
            }
        };

        let key = self.key_for(&project.id);
        let body = serde_json::to_vec_pretty(&project).map_err(StoreError::Encode)?;

        match self.blobs.put(&key, body, &PutOptions::json()).await {
            Ok(stored) => debug!(key = %stored.key, url = %stored.url, "Project written"),
            Err(e) => return rejected_or_fault(id, e),
        }

        info!(id = %project.id, title = %project.title, "Project added");
        self.signal(CatalogChange::Added { id: project.id }).await;
        Ok(WriteOutcome::Applied { id })
    }

    /// Delete a project. Deleting a missing id succeeds.
    ///
    /// # Errors
    ///
    /// Only for unexpected backend faults. A blank id or one that is not a
    /// single key segment is reported as [`WriteOutcome::Rejected`].
    pub async fn delete(&self, id: &str) -> Result<WriteOutcome> {
        let project_id = match ProjectId::parse(id) {
            Ok(project_id) => project_id,
            Err(e) => {
                info!(id = %id.trim(), field = e.field, "Rejected invalid delete");
                return Ok(WriteOutcome::Rejected {
                    id: id.trim().to_string(),
                    reason: Rejection::Invalid(e),
                });
            }
        };

        let id = project_id.to_string();
        if let Err(e) = self.blobs.delete(&self.key_for(&project_id)).await {
            return rejected_or_fault(id, e);
        }

        info!(id = %project_id, "Project deleted");
        self.signal(CatalogChange::Removed { id: project_id }).await;
        Ok(WriteOutcome::Applied { id })
    }

    async fn read_record(&self, entry: &BlobEntry) -> std::result::Result<Project, RecordError> {
        let bytes = match self.blobs.fetch(entry).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                return Err(RecordError::Missing {
                    key: entry.key.clone(),
                })
            }
            Err(e) => {
                return Err(RecordError::Fetch {
                    key: entry.key.clone(),
                    reason: e.to_string(),
                })
            }
        };

        Project::from_slice(&bytes).map_err(|failure| match failure {
            ParseFailure::Json(source) => RecordError::Parse {
                key: entry.key.clone(),
                source,
            },
            ParseFailure::Shape(source) => RecordError::Shape {
                key: entry.key.clone(),
                source,
            },
        })
    }

    /// The write already landed; a failed signal is only logged.
    async fn signal(&self, change: CatalogChange) {
        if let Err(e) = self.invalidator.invalidate(&change).await {
            warn!(
                invalidator = self.invalidator.name(),
                id = %change.id(),
                error = %e,
                "Catalog invalidation failed"
            );
        }
    }
}

fn rejected_or_fault(id: String, error: Error) -> Result<WriteOutcome> {
    match error {
        Error::Store(StoreError::Unconfigured { credential }) => {
            warn!(id = %id, credential, "Write refused: blob store not configured");
            Ok(WriteOutcome::Rejected {
                id,
                reason: Rejection::Unconfigured { credential },
            })
        }
        other => Err(other),
    }
}
