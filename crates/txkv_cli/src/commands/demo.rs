//! Demo command implementation.

use crate::error::CliResult;
use crate::script;
use tracing::info;
use txkv_core::TransactionalStore;

/// The demonstration sequence.
///
/// Prints, in order: a read of an unknown key, a rejected write, a read
/// hidden by the open transaction, the committed value, two rejected
/// transaction ends, another unknown key, and a rolled back key.
pub const DEMO_SCRIPT: &str = "\
GET A
PUT A 5
BEGIN
PUT A 5
GET A
PUT A 6
COMMIT
GET A
COMMIT
ROLLBACK
GET B
BEGIN
PUT B 10
ROLLBACK
GET B
";

/// Returns the lines the demonstration prints.
pub fn lines(compat: bool) -> CliResult<Vec<String>> {
    let commands = script::parse(DEMO_SCRIPT)?;
    let mut store = TransactionalStore::new();
    Ok(script::execute_all(&mut store, &commands, compat))
}

/// Runs the demo command.
pub fn run(compat: bool) -> CliResult<()> {
    info!(compat, "running demonstration sequence");
    for line in lines(compat)? {
        println!("{line}");
    }
    Ok(())
}
