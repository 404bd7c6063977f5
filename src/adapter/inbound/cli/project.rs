//! Handlers for the `projects` command group.

use std::process::ExitCode;
use std::sync::Arc;

use crate::adapter::inbound::cli::command::AddProjectArgs;
use crate::adapter::inbound::cli::output::{self, Tone};
use crate::application::{Intake, ProjectForm, SubmitOutcome, WriteOutcome};
use crate::domain::ProjectId;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute `projects list`.
///
/// A failed listing is reported as a warning with an empty catalog.
pub async fn execute_list(config: &Config) -> Result<ExitCode> {
    let store = bootstrap::build_project_store(config)?;
    let (projects, failure) = match store.list().await {
        Ok(projects) => (projects, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    output::catalog(&projects, failure.as_deref());
    Ok(ExitCode::SUCCESS)
}

/// Execute `projects show <id>`.
pub async fn execute_show(config: &Config, id: &str) -> Result<ExitCode> {
    let store = bootstrap::build_project_store(config)?;
    let Some(project) = store.get(&ProjectId::new(id.trim())).await? else {
        output::status(Tone::Fail, &format!("No project with id {id}"));
        return Ok(ExitCode::FAILURE);
    };

    output::project(&project);
    Ok(ExitCode::SUCCESS)
}

/// Execute `projects add`.
///
/// Runs the admin intake; every invalid field is printed.
pub async fn execute_add(config: &Config, args: AddProjectArgs) -> Result<ExitCode> {
    let store = Arc::new(bootstrap::build_project_store(config)?);
    let intake = Intake::new(store);

    match intake.submit(ProjectForm::from(args)).await? {
        SubmitOutcome::Added { id } => {
            output::written("projects.add", "Project added successfully!", &id);
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Invalid(errors) => {
            output::field_errors(&errors);
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Rejected { reason, .. } => {
            output::rejection("Failed to add project", &reason);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Execute `projects delete <id>`.
pub async fn execute_delete(config: &Config, id: &str) -> Result<ExitCode> {
    let store = bootstrap::build_project_store(config)?;

    match store.delete(id).await? {
        WriteOutcome::Applied { id } => {
            output::written("projects.delete", &format!("Deleted project {id}"), &id);
            Ok(ExitCode::SUCCESS)
        }
        WriteOutcome::Rejected { reason, .. } => {
            output::rejection("Failed to delete project", &reason);
            Ok(ExitCode::FAILURE)
        }
    }
}
