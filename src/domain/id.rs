//! Project identifier and its blob key mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// File extension appended to every stored record key.
const RECORD_EXTENSION: &str = ".json";

/// Project identifier - newtype for type safety.
///
/// Ids are caller-supplied opaque strings. Ordering is plain lexicographic
/// byte order, which the catalog uses as its recency order.
///
/// An id becomes exactly one key segment, so [`ProjectId::parse`] refuses
/// separators and dot segments. [`ProjectId::new`] does not check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new `ProjectId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Trim and check a caller-supplied id.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `id` when the value is blank, contains
    /// a `/` or a backslash, or is `.` or `..`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ValidationError::required("id"));
        }
        if id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(ValidationError::new(
                "id",
                format!("'{id}' must be a single key segment"),
            ));
        }
        Ok(Self::new(id))
    }

    /// Get the project ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blob key of this record under `prefix` (`<prefix><id>.json`).
    #[must_use]
    pub fn key(&self, prefix: &str) -> String {
        format!("{prefix}{}{RECORD_EXTENSION}", self.0)
    }

    /// Recover the id from a blob key produced by [`ProjectId::key`].
    ///
    /// Keys nested deeper than `prefix`, or whose id would not pass
    /// [`ProjectId::parse`] unchanged, are not record keys.
    #[must_use]
    pub fn from_key(key: &str, prefix: &str) -> Option<Self> {
        let raw = key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(RECORD_EXTENSION))?;
        Self::parse(raw).ok().filter(|id| id.as_str() == raw)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
