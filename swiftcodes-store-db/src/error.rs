// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Error types for record store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during record store operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// A record with this code is already stored
    #[error("SWIFT code {0} already exists")]
    DuplicateCode(String),

    /// No record with this code
    #[error("SWIFT code {0} not found")]
    CodeNotFound(String),
}

impl Error {
    /// Map a primary key violation on `code` to [`Error::DuplicateCode`].
    pub(crate) fn from_insert(err: rusqlite::Error, code: &str) -> Self {
        if is_primary_key_violation(&err) {
            Error::DuplicateCode(code.to_owned())
        } else {
            Error::Sqlite(err)
        }
    }
}

pub(crate) fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
