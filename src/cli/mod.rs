//! CLI layer: argument parsing, shared options, output and command dispatch

pub mod args;
pub mod commands;
pub mod docs;
pub mod error;
pub mod options;
pub mod output;

pub use args::{build_command, Cli, Commands};
pub use error::{CliError, CliResult};
pub use options::{BaseOpt, DbArgs, OptSpec};
