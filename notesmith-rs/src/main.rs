//! Notesmith CLI entry point.

use clap::Parser;
use notesmith::cli::args::{Cli, Commands};
use notesmith::cli::output::Output;
use notesmith::cli::{append, create, daily, delete, get, list, patch, search};
use notesmith::config::Config;
use notesmith::error::{ExitCode as NoteExitCode, NoteError};
use notesmith::vault::Vault;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<NoteExitCode, NoteError> {
    let config = Config::load()?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::open(vault_path, config)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Search(args) => search::run(&vault, args, &output)?,
        Commands::Get(args) => get::run(&vault, args, &output)?,
        Commands::List(args) => list::run(&vault, args, &output)?,
        Commands::Create(args) => create::run(&vault, args, &output)?,
        Commands::Append(args) => append::run(&vault, args, &output)?,
        Commands::Patch(args) => patch::run(&vault, args, &output)?,
        Commands::Daily(args) => daily::run(&vault, args, &output)?,
        Commands::Delete(args) => delete::run(&vault, args, &output)?,
    }

    Ok(NoteExitCode::Success)
}
