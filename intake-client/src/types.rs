//! Types for the intake client API

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the intake server
    pub base_url: String,
    /// Request timeout in seconds (default: 10). A timeout counts as a network failure.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Body of `POST /api/contact`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub phone: String,
    pub message: String,
}

/// A stored contact request as listed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub created_at: String,
}

/// Result of fetching stored requests. A failed fetch is an error, never `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestsSnapshot {
    /// Server reachable, nothing stored yet
    Empty,
    /// Stored requests, newest first
    Loaded(Vec<ContactRequest>),
}

/// Response envelope shared by the intake endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub data: Option<Vec<ContactRequest>>,
    #[serde(default)]
    pub message: Option<String>,
}
