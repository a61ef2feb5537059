//! Rust client SDK for the contact intake API
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use intake_client::{ClientConfig, ContactForm, FileFallbackStore, IntakeClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(IntakeClient::new(ClientConfig {
//!     base_url: "http://localhost:3000".into(),
//!     ..Default::default()
//! })?);
//! let fallback = Arc::new(FileFallbackStore::new("/tmp/intake"));
//!
//! let mut form = ContactForm::new(client, fallback);
//! form.name = "Aigerim".into();
//! form.phone = "87001234567".into();
//! form.message = "Need a landing page".into();
//!
//! let outcome = form.submit().await;
//! println!("{}", outcome.user_message().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod client;
pub mod error;
pub mod fallback;
pub mod form;
pub mod types;
pub mod validation;

// Re-export main types
pub use admin::{load_requests, AdminStatus};
pub use client::IntakeClient;
pub use error::{FallbackError, Result, SubmissionError};
pub use fallback::{FallbackStore, FileFallbackStore, LocalFallbackRecord, MemoryFallbackStore};
pub use form::{ContactForm, FormOutcome, MSG_ACCEPTED, MSG_SAVED_LOCALLY};
pub use types::*;
pub use validation::{validate_form, FormError, FormErrors, FormField};
