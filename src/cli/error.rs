//! CLI-level errors and their styled rendering

use std::io::Write;

use thiserror::Error;

use crate::cli::output;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// User-correctable condition: bad input, unreachable database, ...
    #[error("{0}")]
    User(String),

    #[error("cannot render {what}: {message}")]
    Render { what: String, message: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::User(_) => exitcode::FAILURE,
            CliError::Render { .. } => exitcode::SOFTWARE,
            CliError::Io { .. } => exitcode::IOERR,
            CliError::Logging(_) => exitcode::SOFTWARE,
        }
    }

    /// Render as `Error: <message>`, red on a color-capable stderr, plain into `file`.
    pub fn show(&self, file: Option<&mut dyn Write>) {
        output::err_with(&format!("Error: {self}"), output::ERR_COLOR, file);
    }
}
