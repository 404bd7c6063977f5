//! Command-line interface definitions.
//!
//! Defines the CLI structure for the folio catalog tool using `clap`.
//! Subcommands manage project records, inspect configuration, and check
//! connectivity to the blob backend.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::ProjectForm;

/// Portfolio project catalog over a remote blob store
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (optional; defaults apply if missing)
    #[arg(short, long, global = true, default_value = "folio.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the folio CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage project records
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `folio projects`.
#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List every project, newest first.
    List,
    /// Show a single project.
    Show(ProjectIdArg),
    /// Validate and add a new project.
    Add(AddProjectArgs),
    /// Delete a project by id.
    Delete(ProjectIdArg),
}

/// Subcommands for `folio config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Subcommands for `folio check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Verify the blob store credential and listing.
    Store,
}

/// A single project id.
#[derive(Args, Debug)]
pub struct ProjectIdArg {
    /// Project id
    pub id: String,
}

/// Fields of the admin project form.
#[derive(Args, Debug)]
pub struct AddProjectArgs {
    /// Project title (at least 3 characters)
    #[arg(long)]
    pub title: String,

    /// Project description (at least 10 characters)
    #[arg(long)]
    pub description: String,

    /// Image URL; a placeholder is used when omitted
    #[arg(long, default_value = "")]
    pub image: String,

    /// Comma-separated technologies, e.g. "Rust, Tokio"
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Live demo URL
    #[arg(long, default_value = "")]
    pub live_url: String,

    /// Source repository URL
    #[arg(long, default_value = "")]
    pub github_url: String,
}

impl From<AddProjectArgs> for ProjectForm {
    fn from(args: AddProjectArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            image: args.image,
            tags: args.tags,
            live_url: args.live_url,
            github_url: args.github_url,
        }
    }
}
