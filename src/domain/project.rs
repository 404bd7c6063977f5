//! The project record and its normalization rules.
//!
//! A [`ProjectDraft`] is whatever a caller handed in: every field optional,
//! `tags` any JSON value. [`ProjectDraft::normalize`] is the single gate
//! between that and a [`Project`], used both before writing and when reading
//! stored records back.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::id::ProjectId;
use crate::error::ValidationError;

/// Image used when a project has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=400";

/// A portfolio project as persisted in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

impl Project {
    /// Parse a stored record, applying the same rules as a write.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the bytes are not a record object, or the
    /// validation error when a required field is missing or blank.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseFailure> {
        let draft: ProjectDraft = serde_json::from_slice(bytes).map_err(ParseFailure::Json)?;
        draft.normalize().map_err(ParseFailure::Shape)
    }
}

/// Why stored bytes could not become a [`Project`].
#[derive(Debug)]
pub enum ParseFailure {
    Json(serde_json::Error),
    Shape(ValidationError),
}

/// Unvalidated project input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default, deserialize_with = "string_or_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Value,
    #[serde(default, deserialize_with = "string_or_none")]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub github_url: Option<String>,
}

impl ProjectDraft {
    /// Draft with the three required fields set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set tags from any JSON value; non-arrays normalize to no tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<Value>) -> Self {
        self.tags = tags.into();
        self
    }

    #[must_use]
    pub fn with_live_url(mut self, url: impl Into<String>) -> Self {
        self.live_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_github_url(mut self, url: impl Into<String>) -> Self {
        self.github_url = Some(url.into());
        self
    }

    /// The id as given, trimmed, or empty when absent.
    #[must_use]
    pub fn id_hint(&self) -> &str {
        self.id.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Validate required fields and fill defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first of `id`, `title`,
    /// `description` that is missing or blank, or `id` when it is not a
    /// single key segment.
    pub fn normalize(self) -> Result<Project, ValidationError> {
        let id = ProjectId::parse(&required("id", self.id)?)?;
        let title = required("title", self.title)?;
        let description = required("description", self.description)?;

        Ok(Project {
            id,
            title,
            description,
            image: non_blank(self.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            tags: normalize_tags(self.tags),
            live_url: non_blank(self.live_url),
            github_url: non_blank(self.github_url),
        })
    }
}

impl From<Project> for ProjectDraft {
    fn from(project: Project) -> Self {
        Self {
            id: Some(project.id.as_str().to_string()),
            title: Some(project.title),
            description: Some(project.description),
            image: Some(project.image),
            tags: Value::from(project.tags),
            live_url: project.live_url,
            github_url: project.github_url,
        }
    }
}

/// Accept any JSON value; only strings are kept.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    non_blank(value).ok_or_else(|| ValidationError::required(field))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keep string entries of an array; anything that is not an array yields no tags.
fn normalize_tags(tags: Value) -> Vec<String> {
    match tags {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Order projects newest first: `id` descending, lexicographic.
pub fn sort_newest_first(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.id.cmp(&a.id));
}
