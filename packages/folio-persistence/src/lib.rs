//! Persistent implementation of [`StorageProvider`] backed by SQLite.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use folio_traits::{StorageError, StorageProvider};
use rusqlite::{Connection, OptionalExtension, params};
use rusqlite_migration::{M, Migrations};
use thiserror::Error;

const DB_FILE_NAME: &str = "storage.sqlite3";

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE kv (
            key   TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )])
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to migrate storage schema: {0}")]
    Migration(#[from] rusqlite_migration::Error),
    #[error("could not create storage directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data directory is available on this platform")]
    NoDataDir,
}

impl From<PersistenceError> for StorageError {
    fn from(value: PersistenceError) -> Self {
        StorageError::Backend(Box::new(value))
    }
}

/// Key-value storage in a single SQLite table
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `path` and bring its schema up to date
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        #[cfg(feature = "tracing")]
        tracing::info!("Using storage database {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Open the database in the platform's data directory
    pub fn open_default() -> Result<Self, PersistenceError> {
        Self::open(default_db_path()?)
    }

    /// A private, non-persistent database. Useful in tests.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, PersistenceError> {
        migrations().to_latest(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        f(&conn).map_err(|err| PersistenceError::from(err).into())
    }
}

#[cfg(not(any(target_os = "android", target_os = "ios")))]
fn default_db_path() -> Result<PathBuf, PersistenceError> {
    use directories::ProjectDirs;
    let dirs = ProjectDirs::from("rs", "Folio", "Folio").ok_or(PersistenceError::NoDataDir)?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}

#[cfg(any(target_os = "android", target_os = "ios"))]
fn default_db_path() -> Result<PathBuf, PersistenceError> {
    Err(PersistenceError::NoDataDir)
}

impl StorageProvider for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .map(|_| ())
        })
    }
}
