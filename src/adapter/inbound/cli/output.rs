//! Terminal rendering for catalog commands.
//!
//! With `--json` a command prints exactly one JSON document on stdout.
//! Otherwise it prints colored human text, which `--quiet` reduces to
//! warnings and failures. Failures always go to stderr.

use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

use crate::application::{FormErrors, Rejection};
use crate::domain::Project;

/// Output mode selected by the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    fn human(self) -> bool {
        !self.json && !self.quiet
    }
}

static OUTPUT: OnceLock<OutputConfig> = OnceLock::new();

/// Set the output mode. Only the first call takes effect.
pub fn configure(config: OutputConfig) {
    let _ = OUTPUT.set(config);
}

fn current() -> OutputConfig {
    OUTPUT.get().copied().unwrap_or_default()
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Warn,
    Fail,
}

impl Tone {
    fn symbol(self) -> String {
        match self {
            Self::Ok => "✓".green().to_string(),
            Self::Warn => "⚠".yellow().to_string(),
            Self::Fail => "×".red().to_string(),
        }
    }
}

fn status_line(tone: Tone, message: &str) -> String {
    format!("  {} {message}", tone.symbol())
}

/// Print a status line.
///
/// `Fail` goes to stderr in every mode. `Warn` survives `--quiet` but is
/// left to the command's JSON document under `--json`.
pub fn status(tone: Tone, message: &str) {
    let config = current();
    match tone {
        Tone::Fail if config.json => eprintln!("{}", json!({ "error": message })),
        Tone::Fail => eprintln!("{}", status_line(tone, message)),
        Tone::Warn if !config.json => println!("{}", status_line(tone, message)),
        Tone::Ok if config.human() => println!("{}", status_line(tone, message)),
        _ => {}
    }
}

pub fn heading(title: &str) {
    if current().human() {
        println!();
        println!("{}", title.bold());
    }
}

pub fn field(label: &str, value: impl Display) {
    if current().human() {
        println!("  {:<12} {value}", label.dimmed());
    }
}

pub fn note(message: &str) {
    if current().human() {
        println!("  {}", message.dimmed());
    }
}

pub fn hint(message: &str) {
    if current().human() {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Print a command's JSON document.
pub fn document(value: Value) {
    println!("{value}");
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Live")]
    live: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            tags: project.tags.join(", "),
            live: project.live_url.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn catalog_table(projects: &[Project]) -> String {
    Table::new(projects.iter().map(ProjectRow::from)).to_string()
}

/// Render a catalog listing. `warning` carries the listing failure, if any.
pub fn catalog(projects: &[Project], warning: Option<&str>) {
    if is_json() {
        document(json!({
            "command": "projects.list",
            "projects": projects,
            "warning": warning,
        }));
        return;
    }

    if let Some(reason) = warning {
        status(Tone::Warn, &format!("Could not list projects: {reason}"));
    }
    if !current().human() {
        return;
    }

    heading("Projects");
    if projects.is_empty() {
        note("(no projects)");
        return;
    }
    for line in catalog_table(projects).lines() {
        println!("  {line}");
    }
    note(&format!("{} project(s)", projects.len()));
}

/// Render one project in full.
pub fn project(project: &Project) {
    if is_json() {
        document(json!({
            "command": "projects.show",
            "project": project,
        }));
        return;
    }

    heading(&project.title);
    field("Id", project.id.cyan());
    field("Description", &project.description);
    field("Image", project.image.dimmed());
    if !project.tags.is_empty() {
        field("Tags", project.tags.join(", "));
    }
    if let Some(url) = &project.live_url {
        field("Live", url);
    }
    if let Some(url) = &project.github_url {
        field("Source", url);
    }
}

/// Report a write that landed.
pub fn written(command: &str, message: &str, id: &str) {
    if is_json() {
        document(json!({ "command": command, "id": id }));
        return;
    }
    status(Tone::Ok, message);
    field("Id", id.cyan());
}

fn errors_document(errors: &FormErrors) -> Value {
    let fields: Vec<Value> = errors
        .0
        .iter()
        .map(|e| json!({ "field": e.field, "message": e.message }))
        .collect();
    json!({ "errors": fields })
}

/// Report every invalid form field on stderr.
pub fn field_errors(errors: &FormErrors) {
    if is_json() {
        eprintln!("{}", errors_document(errors));
        return;
    }
    for error in &errors.0 {
        status(Tone::Fail, &error.to_string());
    }
}

/// Report a refused write.
pub fn rejection(action: &str, reason: &Rejection) {
    status(Tone::Fail, &format!("{action}: {reason}"));
    if let Rejection::Unconfigured { credential } = reason {
        hint(&format!("set {credential} in the environment or a .env file"));
    }
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner; it stays hidden unless output is human.
pub fn spinner(message: &str) -> ProgressBar {
    if !current().human() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Stop a spinner, leaving a status line in its place.
pub fn finish(pb: &ProgressBar, tone: Tone, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
        return;
    }
    pb.finish_with_message(format!("{} {message}", tone.symbol()));
}
