use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use folio::adapter::inbound::cli::command::{
    CheckCommand, Cli, Commands, ConfigCommand, ProjectsCommand,
};
use folio::adapter::inbound::cli::output::{self, OutputConfig};
use folio::adapter::inbound::cli::{check, config, diagnostic, project};
use folio::error::Result;
use folio::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let mut settings = match Config::load_optional(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{:?}", diagnostic::report(e, &cli.config));
            return ExitCode::FAILURE;
        }
    };
    settings.logging = settings.logging.with_verbosity(cli.verbose);
    settings.init_logging();

    match run(cli.command, &settings, &cli.config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:?}", diagnostic::report(e, &cli.config));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, settings: &Config, path: &Path) -> Result<ExitCode> {
    match command {
        Commands::Projects(cmd) => match cmd {
            ProjectsCommand::List => project::execute_list(settings).await,
            ProjectsCommand::Show(arg) => project::execute_show(settings, &arg.id).await,
            ProjectsCommand::Add(args) => project::execute_add(settings, args).await,
            ProjectsCommand::Delete(arg) => project::execute_delete(settings, &arg.id).await,
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommand::Show => config::execute_show(settings, path),
            ConfigCommand::Validate => config::execute_validate(settings, path),
        },
        Commands::Check(cmd) => match cmd {
            CheckCommand::Store => check::store::execute_store(settings).await,
        },
    }
}
