// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database connection management.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{SCHEMA_SQL, TABLE_NAME};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_PRAGMAS: &str = r#"
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA foreign_keys = ON;
"#;

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only access
    ReadOnly,
    /// Read-write access to an existing database
    ReadWrite,
    /// Create new database (and schema) if it doesn't exist
    Create,
}

/// SQLite database connection holding the SWIFT code records.
pub struct StoreDb {
    pub(crate) conn: Connection,
}

impl StoreDb {
    /// Open the database at `path`.
    ///
    /// [`OpenMode::Create`] creates the file and schema as needed; the other
    /// modes fail with [`Error::DatabaseNotFound`] if the file is missing.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        if mode != OpenMode::Create && !path.exists() {
            return Err(Error::DatabaseNotFound(path.to_owned()));
        }

        let flags = match mode {
            OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            Error::DatabaseOpen {
                path: path.to_owned(),
                source,
            }
        })?;

        let db = Self::initialize(conn, mode)?;
        debug!("Opened {} ({mode:?})", path.display());
        Ok(db)
    }

    /// Create an in-memory database with the full schema (for testing).
    pub fn open_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?, OpenMode::Create)
    }

    fn initialize(conn: Connection, mode: OpenMode) -> Result<Self> {
        // The server and the importer may write to the same file.
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let db = Self { conn };
        match mode {
            OpenMode::Create => {
                db.conn.execute_batch(CREATE_PRAGMAS)?;
                db.create_schema()?;
            }
            // Foreign keys are a per-connection setting.
            OpenMode::ReadWrite => db.conn.execute_batch("PRAGMA foreign_keys = ON;")?,
            OpenMode::ReadOnly => {}
        }
        Ok(db)
    }

    /// Create the records table and its indexes if they are missing.
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Get raw connection (for advanced usage).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Check if the database has the records table.
    pub fn has_schema(&self) -> Result<bool> {
        let exists = self
            .conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?
            .exists([TABLE_NAME])?;
        Ok(exists)
    }
}
