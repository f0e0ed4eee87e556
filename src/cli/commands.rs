//! Command dispatch

use std::io::Write;

use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{build_command, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::options::DbArgs;
use crate::cli::output;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show { db } => config_show(db),
            ConfigCommands::Url { db } => config_url(db),
        },
        Some(Commands::Info { db }) => config_show(db),
        Some(Commands::Completion { shell }) => completion(*shell),
        None => print_help(),
    }
}

#[instrument(skip(db))]
fn config_show(db: &DbArgs) -> CliResult<()> {
    debug!("resolved DB options: {:?}", db);
    db.validate()?;
    let rendered = db.to_toml()?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(db))]
fn config_url(db: &DbArgs) -> CliResult<()> {
    debug!("resolved DB options: {:?}", db);
    db.validate()?;
    output::info(&db.url()?);
    Ok(())
}

#[instrument]
fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = build_command();
    let name = cmd.get_name().to_string();
    let mut script: Vec<u8> = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    debug!("generated {} bytes of {} completions", script.len(), shell);
    std::io::stdout()
        .write_all(&script)
        .map_err(|e| CliError::io("write completion script", e))
}

fn print_help() -> CliResult<()> {
    build_command()
        .print_help()
        .map_err(|e| CliError::io("write help", e))
}
