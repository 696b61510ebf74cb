//! CLI error types.

use std::io;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while parsing a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The line starts with a verb that is not a command.
    #[error("line {line}: unknown command '{verb}'")]
    UnknownCommand {
        /// 1-based line number.
        line: usize,
        /// The unrecognized verb.
        verb: String,
    },

    /// A required argument is missing.
    #[error("line {line}: {command} requires a {argument}")]
    MissingArgument {
        /// 1-based line number.
        line: usize,
        /// The command being parsed.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A value is not a 32-bit signed integer.
    #[error("line {line}: invalid value '{value}'")]
    InvalidValue {
        /// 1-based line number.
        line: usize,
        /// The rejected text.
        value: String,
    },

    /// The line has more tokens than the command takes.
    #[error("line {line}: unexpected '{token}'")]
    TrailingInput {
        /// 1-based line number.
        line: usize,
        /// The first extra token.
        token: String,
    },
}

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Script could not be parsed.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported output format.
    #[error("unknown output format '{0}' (expected text or json)")]
    UnknownFormat(String),
}
