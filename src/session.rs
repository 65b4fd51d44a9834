//! The session state machine: `closed → open → closed`, terminal once closed.
use std::path::Path;
use tracing::{debug, instrument};

use crate::errors::Error;
use crate::storage::Table;

pub enum Session {
    Open(Table),
    Closed,
}

impl Session {
    /// Opens `path`, the only transition out of `Closed`.
    #[instrument(skip(path))]
    pub fn open(path: impl AsRef<Path>) -> Result<Session, Error> {
        let table = Table::open(path)?;
        debug!("session opened");
        Ok(Session::Open(table))
    }

    /// Panics if called on a closed session: the REPL never holds one.
    pub fn table_mut(&mut self) -> &mut Table {
        match self {
            Session::Open(table) => table,
            Session::Closed => unreachable!("session used after close"),
        }
    }

    /// Flushes and closes the underlying table. Terminal: a closed
    /// session never reopens.
    #[instrument(skip(self))]
    pub fn close(&mut self) -> Result<(), Error> {
        if let Session::Open(table) = self {
            table.close()?;
        }
        *self = Session::Closed;
        debug!("session closed");
        Ok(())
    }
}
