//! Line-oriented store scripts.
//!
//! One command per line, verbs are case-insensitive:
//!
//! ```text
//! # comment
//! BEGIN
//! PUT <key> <value>
//! GET <key>
//! COMMIT
//! ROLLBACK
//! ```
//!
//! Keys are single whitespace-free tokens. `#` starts a comment only at the
//! beginning of a line or after whitespace, so `a#b` is an ordinary key.
//! The token `""` stands for the empty key; there is no escape for a key
//! made of two literal quote characters.

use crate::error::ScriptError;
use txkv_core::{TransactionalStore, Value};

/// Text printed for a read that found nothing, outside compat mode.
pub const ABSENT_TEXT: &str = "(absent)";

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin a transaction.
    Begin,
    /// Stage a write.
    Put {
        /// Key to write.
        key: String,
        /// Value to write.
        value: Value,
    },
    /// Read a key.
    Get {
        /// Key to read.
        key: String,
    },
    /// Commit the open transaction.
    Commit,
    /// Roll back the open transaction.
    Rollback,
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, raw)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Parses one line. Returns `None` for blank and comment lines.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Command>, ScriptError> {
    let text = strip_comment(raw);
    let mut tokens = text.split_whitespace();

    let Some(verb) = tokens.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_uppercase().as_str() {
        "BEGIN" => Command::Begin,
        "COMMIT" => Command::Commit,
        "ROLLBACK" => Command::Rollback,
        "GET" => Command::Get {
            key: parse_key(tokens.next(), line, "GET")?,
        },
        "PUT" => {
            let key = parse_key(tokens.next(), line, "PUT")?;
            let raw_value = tokens.next().ok_or(ScriptError::MissingArgument {
                line,
                command: "PUT",
                argument: "value",
            })?;
            let value = raw_value
                .parse::<Value>()
                .map_err(|_| ScriptError::InvalidValue {
                    line,
                    value: raw_value.to_string(),
                })?;
            Command::Put { key, value }
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                verb: verb.to_string(),
            })
        }
    };

    if let Some(token) = tokens.next() {
        return Err(ScriptError::TrailingInput {
            line,
            token: token.to_string(),
        });
    }

    Ok(Some(command))
}

/// Cuts the line at the first `#` that begins a token.
fn strip_comment(raw: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, ch) in raw.char_indices() {
        if ch == '#' && prev_is_space {
            return &raw[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    raw
}

fn parse_key(token: Option<&str>, line: usize, command: &'static str) -> Result<String, ScriptError> {
    match token {
        Some("\"\"") => Ok(String::new()),
        Some(key) => Ok(key.to_string()),
        None => Err(ScriptError::MissingArgument {
            line,
            command,
            argument: "key",
        }),
    }
}

/// Executes one command against a store.
///
/// Returns the line to print, if any: the value for a `GET`, the error
/// message for a rejected command. Rejections never stop execution.
pub fn execute(store: &mut TransactionalStore, command: &Command, compat: bool) -> Option<String> {
    let result = match command {
        Command::Begin => store.begin_transaction(),
        Command::Put { key, value } => store.put(key.as_str(), *value),
        Command::Commit => store.commit(),
        Command::Rollback => store.rollback(),
        Command::Get { key } => {
            let text = if compat {
                store.get_or_sentinel(key).to_string()
            } else {
                store
                    .get(key)
                    .map_or_else(|| ABSENT_TEXT.to_string(), |v| v.to_string())
            };
            return Some(text);
        }
    };

    match result {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!(?command, %err, "command rejected");
            Some(err.to_string())
        }
    }
}

/// Executes commands in order and collects the printed lines.
pub fn execute_all(store: &mut TransactionalStore, commands: &[Command], compat: bool) -> Vec<String> {
    commands
        .iter()
        .filter_map(|command| execute(store, command, compat))
        .collect()
}
