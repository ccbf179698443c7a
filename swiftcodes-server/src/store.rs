use std::path::{Path, PathBuf};

use swiftcodes_store_db::{OpenMode, StoreDb};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::error::{RegistryError, Result, ServerError};

/// Handle to the record store shared by all request handlers.
///
/// The SQLite connection is opened on first use. Each request holds the
/// guard returned by [`Store::get_db`] for the duration of one operation.
pub struct Store {
    database_path: PathBuf,
    db: Mutex<Option<StoreDb>>,
}

impl Store {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            db: Mutex::new(None),
        }
    }

    /// A store backed by a fresh in-memory database.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            database_path: PathBuf::from(":memory:"),
            db: Mutex::new(Some(StoreDb::open_memory()?)),
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub async fn get_db(&self) -> Result<MappedMutexGuard<'_, StoreDb>> {
        let mut db_guard = self.db.lock().await;

        if db_guard.is_none() {
            let db = StoreDb::open(&self.database_path, OpenMode::Create)?;
            log::info!("opened database {}", self.database_path.display());
            *db_guard = Some(db);
        }

        MutexGuard::try_map(db_guard, Option::as_mut).map_err(|_| {
            RegistryError::from(ServerError::DatabaseUnavailable {
                path: self.database_path.clone(),
            })
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(PathBuf::from("swift_codes.db"))
    }
}
