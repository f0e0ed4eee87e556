//! CLI argument definitions using clap

use clap::{Command, CommandFactory, Id, Parser, Subcommand};

use crate::cli::docs::documented_by;
use crate::cli::options::DbArgs;

/// Command-line scaffold for Materialize tooling
#[derive(Parser, Debug)]
#[command(name = "mzt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect resolved DB connection settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    // Help text is forwarded from `config show` in `build_command`.
    Info {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved DB connection settings
    Show {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Print DB connection URL
    Url {
        #[command(flatten)]
        db: DbArgs,
    },
}

/// Root command with registration-time adjustments applied.
///
/// Use this instead of `Cli::command()` so help output matches what runs.
pub fn build_command() -> Command {
    let cmd = ignore_empty_env(Cli::command());
    let show = cmd
        .find_subcommand("config")
        .and_then(|config| config.find_subcommand("show"))
        .cloned();
    match show {
        Some(show) => cmd.mut_subcommand("info", |info| documented_by(&show, info)),
        None => cmd,
    }
}

/// Detach environment variables that are set but empty, so the option falls
/// back to its default. An explicit empty flag value is still accepted.
fn ignore_empty_env(mut cmd: Command) -> Command {
    let empty: Vec<Id> = cmd
        .get_arguments()
        .filter(|arg| {
            arg.get_env()
                .and_then(std::env::var_os)
                .is_some_and(|value| value.is_empty())
        })
        .map(|arg| arg.get_id().clone())
        .collect();
    for id in empty {
        cmd = cmd.mut_arg(id, |arg| arg.env(None::<&'static str>));
    }

    let subcommands: Vec<String> = cmd
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect();
    for name in subcommands {
        cmd = cmd.mut_subcommand(name, ignore_empty_env);
    }
    cmd
}
