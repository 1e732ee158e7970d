//! Error types for the ledger operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// File missing, unreadable, malformed, or missing a required column.
    #[error("Import error: {0}")]
    Import(String),

    /// Storage unreachable or a write rejected; the batch is rolled back.
    #[error("Store write error: {0}")]
    StoreWrite(String),

    /// Storage unreachable on read, or a stored row no longer parses.
    #[error("Store query error: {0}")]
    StoreQuery(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
