//! intake-node: contact request intake server
//!
//! Request path for `POST /api/contact`:
//! - Admission gate (per peer address, fixed window)
//! - Validation (never trusts the client)
//! - Durable SQLite storage with server-assigned id and timestamp
//!
//! `GET /api/requests` returns everything stored, newest first.

pub mod admission;
pub mod api;
pub mod clock;
pub mod config;
pub mod storage;
pub mod types;
pub mod validation;

// Re-exports
pub use admission::{AdmissionGate, RateBucket, RateLimitConfig};
pub use api::{create_router, AppState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use storage::{RequestStore, SqliteRequestStore, StorageError};
pub use types::{ContactPayload, ContactRequest, NewContactRequest};
pub use validation::{validate, ErrorCode, Field, FieldErrors};
