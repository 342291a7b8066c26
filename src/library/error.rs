//! Error types for library metadata access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the library databases.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The library directory does not contain the expected database file.
    #[error("Library database not found at {0}")]
    MissingDatabase(PathBuf),

    /// Failed to copy a database file to its temporary location.
    #[error("Failed to copy database {path}: {source}")]
    CopyDatabase {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open a database file.
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A query failed.
    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}
