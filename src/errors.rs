//! Error taxonomy for the engine.
use std::fmt;

/// Errors produced anywhere in the engine, from parsing a line of input
/// down to a failed `read(2)` on the underlying file.
///
/// The REPL (see [`crate::repl`]) uses the variant to decide whether to
/// keep looping (parse/execute errors) or print a diagnostic and exit the
/// process (I/O/structural errors).
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Malformed statement, e.g. a meta-command missing its keyword.
    Syntax(String),
    /// `insert` with a negative id.
    NegativeId,
    /// `insert` with a username or email past its fixed capacity.
    StringTooLong,
    /// `insert` with a key already present in the table.
    DuplicateKey,
    /// The leaf is at `max_cells` and no split path exists yet.
    TableFull,
    /// The on-disk file is not a whole multiple of `PAGE_SIZE`, or a page
    /// number fell outside `[0, TABLE_MAX_PAGES)`.
    Corrupt(String),
    /// A design stop: leaf split or internal-node search, neither of
    /// which this revision implements.
    Unimplemented(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "Error: {}", e),
            Error::Syntax(msg) => write!(f, "{}", msg),
            Error::NegativeId => write!(f, "ERROR: ID must be positive"),
            Error::StringTooLong => write!(f, "ERROR: String is too long"),
            Error::DuplicateKey => write!(f, "Error: Duplicate key."),
            Error::TableFull => write!(f, "Error: Table is full"),
            Error::Corrupt(msg) => write!(f, "Error: {}", msg),
            Error::Unimplemented(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl Error {
    /// I/O and structural errors abort the process after a diagnostic;
    /// parse-time and execute-time errors are reported on the shell and
    /// never abort it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Corrupt(_) | Error::Unimplemented(_))
    }
}
