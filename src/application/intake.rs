//! Admin intake: turns the operator's project form into a stored record.
//!
//! Form rules are stricter than the store's own checks: a title needs at
//! least 3 characters, a description at least 10, and every URL field must
//! be blank or an absolute URL. All violations are reported at once.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use url::Url;

use super::catalog::{ProjectStore, Rejection, WriteOutcome};
use crate::domain::{ProjectDraft, PLACEHOLDER_IMAGE};
use crate::error::Result;

const MIN_TITLE_CHARS: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Source of ids for newly submitted projects.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// UUID v7 ids. Their text form sorts by creation time, so the catalog's
/// id-descending order lists intake-created projects newest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOrderedIds;

impl IdGenerator for TimeOrderedIds {
    fn next_id(&self) -> String {
        uuid::Uuid::now_v7().to_string()
    }
}

/// Raw form input. Blank strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Comma-separated list of technologies.
    pub tags: String,
    pub live_url: String,
    pub github_url: String,
}

/// One invalid form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every invalid field of a submitted form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", summarize(.0))]
pub struct FormErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormErrors {
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    /// Message for `field`, if it was invalid.
    #[must_use]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Form fields after validation.
struct CheckedForm<'a> {
    title: &'a str,
    description: &'a str,
    image: Option<String>,
    live_url: Option<String>,
    github_url: Option<String>,
}

impl ProjectForm {
    /// Check every field against the form rules.
    ///
    /// # Errors
    ///
    /// Returns every field that violates the form rules.
    pub fn validate(&self) -> std::result::Result<(), FormErrors> {
        self.check().map(|_| ())
    }

    /// Check the form and build a draft carrying `id`.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectForm::validate`].
    pub fn into_draft(self, id: String) -> std::result::Result<ProjectDraft, FormErrors> {
        let checked = self.check()?;

        let mut draft = ProjectDraft::new(id, checked.title, checked.description)
            .with_image(
                checked
                    .image
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            )
            .with_tags(split_tags(&self.tags));
        draft.live_url = checked.live_url;
        draft.github_url = checked.github_url;
        Ok(draft)
    }

    fn check(&self) -> std::result::Result<CheckedForm<'_>, FormErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            errors.push(FieldError {
                field: "title",
                message: format!("Title must be at least {MIN_TITLE_CHARS} characters"),
            });
        }

        let description = self.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(FieldError {
                field: "description",
                message: format!(
                    "Description must be at least {MIN_DESCRIPTION_CHARS} characters"
                ),
            });
        }

        let image = optional_url("image", &self.image, &mut errors);
        let live_url = optional_url("live_url", &self.live_url, &mut errors);
        let github_url = optional_url("github_url", &self.github_url, &mut errors);

        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        Ok(CheckedForm {
            title,
            description,
            image,
            live_url,
            github_url,
        })
    }
}

/// Blank ⇒ `None`; otherwise the value must parse as an absolute URL.
fn optional_url(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match Url::parse(value) {
        Ok(_) => Some(value.to_string()),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: "Please enter a valid URL".to_string(),
            });
            None
        }
    }
}

/// Split a comma-separated tag list, dropping empty entries.
#[must_use]
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Outcome of [`Intake::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The project was stored under `id`.
    Added { id: String },
    /// The form was invalid; nothing was sent to the store.
    Invalid(FormErrors),
    /// The store refused the write.
    Rejected { id: String, reason: Rejection },
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Validates project forms and adds them to the catalog.
pub struct Intake {
    store: Arc<ProjectStore>,
    ids: Box<dyn IdGenerator>,
}

impl Intake {
    /// Intake minting [`TimeOrderedIds`].
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self::with_ids(store, Box::new(TimeOrderedIds))
    }

    pub fn with_ids(store: Arc<ProjectStore>, ids: Box<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Validate `form` and add it as a new project.
    ///
    /// # Errors
    ///
    /// Only for unexpected backend faults, as [`ProjectStore::add`].
    pub async fn submit(&self, form: ProjectForm) -> Result<SubmitOutcome> {
        let draft = match form.into_draft(self.ids.next_id()) {
            Ok(draft) => draft,
            Err(errors) => {
                info!(fields = ?errors.fields(), "Project form rejected");
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        Ok(match self.store.add(draft).await? {
            WriteOutcome::Applied { id } => SubmitOutcome::Added { id },
            WriteOutcome::Rejected { id, reason } => SubmitOutcome::Rejected { id, reason },
        })
    }
}
