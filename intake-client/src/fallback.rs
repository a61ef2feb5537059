//! Local fallback store
//!
//! Every submission attempt is appended here, whatever the server said. The
//! log is one ordered JSON array under a fixed key; each append rewrites the
//! whole sequence. Entries are never deduplicated or pruned.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FallbackError;
use crate::types::ContactPayload;

/// Key the sequence is stored under
pub const FALLBACK_KEY: &str = "requests";

/// A locally captured submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFallbackRecord {
    pub name: String,
    pub phone: String,
    pub message: String,
    /// Client time of the attempt
    pub date: String,
}

impl LocalFallbackRecord {
    pub fn new(payload: &ContactPayload, at: DateTime<Utc>) -> Self {
        Self {
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            message: payload.message.clone(),
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Append-only client-side log
pub trait FallbackStore: Send + Sync {
    /// Append one record, keeping every prior entry.
    fn append(&self, record: LocalFallbackRecord) -> Result<(), FallbackError>;

    /// All records in append order.
    fn load(&self) -> Result<Vec<LocalFallbackRecord>, FallbackError>;
}

/// File-backed store: `<dir>/requests.json`
pub struct FileFallbackStore {
    path: PathBuf,
    // Serialises read-modify-write within this process
    lock: Mutex<()>,
}

impl FileFallbackStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", FALLBACK_KEY)),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<LocalFallbackRecord>, FallbackError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write via a sibling temp file and rename, so a crash mid-write leaves
    /// the previous sequence intact.
    fn write(&self, records: &[LocalFallbackRecord]) -> Result<(), FallbackError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&serde_json::to_vec(records)?)?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl FallbackStore for FileFallbackStore {
    fn append(&self, record: LocalFallbackRecord) -> Result<(), FallbackError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| FallbackError::Poisoned(e.to_string()))?;

        let mut records = self.read()?;
        records.push(record);
        self.write(&records)?;

        debug!(path = %self.path.display(), total = records.len(), "Appended fallback record");
        Ok(())
    }

    fn load(&self) -> Result<Vec<LocalFallbackRecord>, FallbackError> {
        self.read()
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryFallbackStore {
    records: Mutex<Vec<LocalFallbackRecord>>,
}

impl MemoryFallbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FallbackStore for MemoryFallbackStore {
    fn append(&self, record: LocalFallbackRecord) -> Result<(), FallbackError> {
        self.records
            .lock()
            .map_err(|e| FallbackError::Poisoned(e.to_string()))?
            .push(record);
        Ok(())
    }

    fn load(&self) -> Result<Vec<LocalFallbackRecord>, FallbackError> {
        let records = self
            .records
            .lock()
            .map_err(|e| FallbackError::Poisoned(e.to_string()))?;
        Ok(records.clone())
    }
}
