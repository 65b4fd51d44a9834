//! Translates prepared statements into B-tree operations and prints their
//! observable effect on the shell.
use tracing::{debug, instrument};

use crate::echo;
use crate::errors::Error;
use crate::sql::Statement;
use crate::storage::Table;

#[instrument(skip(table, statement))]
pub fn execute(table: &mut Table, statement: Statement) -> Result<(), Error> {
    match statement {
        Statement::Insert(row) => {
            let id = row.id;
            table.insert(&row)?;
            debug!(id, "row inserted");
            echo!("Executed.\n");
        }
        Statement::Select => {
            let rows = table.select()?;
            debug!(count = rows.len(), "rows selected");
            for row in &rows {
                echo!("({}, {}, {})\n", row.id, row.username(), row.email());
            }
            echo!("Executed.\n");
        }
    }
    Ok(())
}
