//! Run command implementation.

use crate::error::{CliError, CliResult};
use crate::script;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};
use txkv_core::{Config, StatsSnapshot, TransactionalStore, Value};

/// Output format of the run command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One printed line per output.
    Text,
    /// A single JSON report.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// Options for the run command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Print absent values as the integer sentinel.
    pub compat: bool,
    /// Let open transactions read their own writes.
    pub read_your_writes: bool,
    /// Output format.
    pub format: OutputFormat,
}

/// Result of running a script.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Printed lines, in order.
    pub outputs: Vec<String>,
    /// Transaction state after the last command.
    pub state: String,
    /// Committed pairs after the last command.
    pub committed: BTreeMap<String, Value>,
    /// Writes left staged by an unfinished transaction.
    pub pending: usize,
    /// Store counters.
    pub stats: StatsReport,
}

/// Serializable store counters.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Transactions started.
    pub transactions_started: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Staged writes.
    pub puts: u64,
    /// Reads.
    pub reads: u64,
    /// Reads hidden by an open transaction.
    pub hidden_reads: u64,
    /// Keys merged by commits.
    pub keys_merged: u64,
    /// Rejected operations.
    pub errors: u64,
}

impl From<StatsSnapshot> for StatsReport {
    fn from(s: StatsSnapshot) -> Self {
        Self {
            transactions_started: s.transactions_started,
            transactions_committed: s.transactions_committed,
            transactions_rolled_back: s.transactions_rolled_back,
            puts: s.puts,
            reads: s.reads,
            hidden_reads: s.hidden_reads,
            keys_merged: s.keys_merged,
            errors: s.errors,
        }
    }
}

/// Executes script source against a fresh store.
pub fn execute(source: &str, options: &RunOptions) -> CliResult<RunReport> {
    let commands = script::parse(source)?;
    info!(commands = commands.len(), "executing script");

    let config = Config::new().read_your_writes(options.read_your_writes);
    let mut store = TransactionalStore::with_config(config);
    let outputs = script::execute_all(&mut store, &commands, options.compat);

    if store.is_active() {
        warn!(
            pending = store.pending_len(),
            "script ended with an open transaction; staged writes are not committed"
        );
    }

    Ok(RunReport {
        outputs,
        state: store.state().to_string(),
        committed: store.snapshot(),
        pending: store.pending_len(),
        stats: store.stats().into(),
    })
}

/// Runs the run command.
pub fn run(file: Option<&Path>, options: &RunOptions) -> CliResult<()> {
    let source = match file {
        Some(path) => {
            info!("Reading script from {:?}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let report = execute(&source, options)?;
    match options.format {
        OutputFormat::Text => {
            for line in &report.outputs {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RunOptions {
        RunOptions {
            compat: false,
            read_your_writes: false,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn parse_output_format() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(CliError::UnknownFormat(f)) if f == "yaml"
        ));
    }

    #[test]
    fn report_reflects_final_state() {
        let report = execute("BEGIN\nPUT a 1\nCOMMIT\nBEGIN\nPUT b 2\n", &options()).unwrap();

        assert_eq!(report.state, "active");
        assert_eq!(report.pending, 1);
        assert_eq!(report.committed.get("a"), Some(&1));
        assert!(!report.committed.contains_key("b"));
        assert_eq!(report.stats.transactions_started, 2);
        assert_eq!(report.stats.keys_merged, 1);
    }

    #[test]
    fn read_your_writes_option() {
        let mut opts = options();
        opts.read_your_writes = true;
        let report = execute("BEGIN\nPUT a 7\nGET a", &opts).unwrap();
        assert_eq!(report.outputs, vec!["7"]);
    }

    #[test]
    fn parse_error_aborts() {
        let err = execute("BEGIN\nPUT a x", &options()).unwrap_err();
        assert!(matches!(err, CliError::Script(_)));
        assert_eq!(
            err.to_string(),
            "script error: line 2: invalid value 'x'"
        );
    }

    #[test]
    fn report_serializes() {
        let report = execute("BEGIN\nPUT a 1\nCOMMIT\nGET a", &options()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outputs"][0], "1");
        assert_eq!(json["state"], "idle");
        assert_eq!(json["committed"]["a"], 1);
        assert_eq!(json["stats"]["transactions_committed"], 1);
    }
}
