//! Storage layer - durable contact request persistence
//!
//! Handles:
//! - Atomic id assignment (SQLite AUTOINCREMENT, ids never reused)
//! - Durability before `insert` returns
//! - Schema constraints mirroring validation, independent of the API layer

pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ContactRequest, NewContactRequest};

pub use sqlite::SqliteRequestStore;

/// Storage errors. Details are logged server-side, never sent to clients.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage task failed: {0}")]
    Task(String),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

/// Backend for accepted contact requests
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persist a validated request, returning its newly assigned id.
    async fn insert(&self, request: NewContactRequest) -> Result<i64, StorageError>;

    /// All stored requests, newest (highest id) first.
    async fn list_all(&self) -> Result<Vec<ContactRequest>, StorageError>;
}
