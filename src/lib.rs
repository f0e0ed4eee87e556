//! `mzt`: command-line scaffold for Materialize tooling.
//!
//! Provides the root command group, the shared database connection option
//! catalog, styled output helpers and the user-facing error type that
//! subcommands plug into.

pub mod cli;
pub mod exitcode;
pub mod logging;

pub use cli::output::{err, info};
pub use cli::{BaseOpt, Cli, CliError, CliResult, DbArgs, OptSpec};
pub use logging::LogConfig;
