//! Statement tokenization and validation for the `insert` / `select` surface.
pub mod parser;
pub mod statement;

pub use parser::prepare_statement;
pub use statement::Statement;
