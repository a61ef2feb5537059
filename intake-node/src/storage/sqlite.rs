//! SQLite-backed request store
//!
//! One connection behind a mutex; every call runs on the blocking pool so the
//! async caller is suspended, not the runtime worker.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::{RequestStore, StorageError};
use crate::clock::{to_timestamp, Clock};
use crate::types::{ContactRequest, NewContactRequest};

// Unicode White_Space, the set `str::trim` strips
const WS: &str = "char(9, 10, 11, 12, 13, 32, 133, 160, 5760, 8192, 8193, 8194, 8195, 8196, \
                  8197, 8198, 8199, 8200, 8201, 8202, 8232, 8233, 8239, 8287, 12288)";

fn schema() -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name, {ws})) > 0),
    phone TEXT NOT NULL CHECK (length(phone) >= 10 AND phone NOT GLOB '*[^0-9]*'),
    message TEXT NOT NULL CHECK (length(trim(message, {ws})) > 0),
    created_at TEXT NOT NULL
);
",
        ws = WS
    )
}

/// Durable request store on a single SQLite database file.
pub struct SqliteRequestStore {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl SqliteRequestStore {
    /// Open or create the database at `db_path`, creating parent directories.
    pub fn open(db_path: &Path, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;

        // WAL for concurrent readers, FULL sync so an insert is on disk when it returns
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        conn.execute_batch(&schema())?;

        info!(path = %db_path.display(), "Request store initialized");

        Ok(Self::from_connection(conn, clock))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        debug!("Opening in-memory request store");

        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&schema())?;

        Ok(Self::from_connection(conn, clock))
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            clock,
        }
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StorageError::Poisoned(e.to_string()))?;
            f(&*conn)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[async_trait]
impl RequestStore for SqliteRequestStore {
    async fn insert(&self, request: NewContactRequest) -> Result<i64, StorageError> {
        let created_at = to_timestamp(self.clock.now());

        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO requests (name, phone, message, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![request.name, request.phone, request.message, created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, "Stored contact request");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ContactRequest>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, name, phone, message, created_at FROM requests ORDER BY id DESC",
            )?;

            let rows = stmt.query_map([], |row| {
                Ok(ContactRequest {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    message: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;

            let requests = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(requests)
        })
        .await
    }
}
