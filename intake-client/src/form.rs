//! Contact form submission flow
//!
//! validate -> send -> append locally (always) -> reset -> user message.
//! The user is told the request was captured in both server outcomes; the
//! wording differs depending on whether the server was reached.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::client::IntakeClient;
use crate::fallback::{FallbackStore, LocalFallbackRecord};
use crate::types::ContactPayload;
use crate::validation::{validate_form, FormErrors};

/// Shown when the server stored the request
pub const MSG_ACCEPTED: &str = "Сұраныс қабылданды!";

/// Shown when the server could not be reached or refused the request
pub const MSG_SAVED_LOCALLY: &str = "Сервер жоқ, сұраныс локалды сақталды.";

/// What happened to one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Client validation failed; nothing was sent or stored
    Invalid(FormErrors),
    /// Server stored the request
    Accepted { id: i64 },
    /// Server unreachable or refused; the request exists only locally
    SavedLocally,
}

impl FormOutcome {
    /// Toast text for the user, if any
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            FormOutcome::Invalid(_) => None,
            FormOutcome::Accepted { .. } => Some(MSG_ACCEPTED),
            FormOutcome::SavedLocally => Some(MSG_SAVED_LOCALLY),
        }
    }
}

/// Contact form state and submit orchestration
pub struct ContactForm {
    client: Arc<IntakeClient>,
    fallback: Arc<dyn FallbackStore>,
    pub name: String,
    pub phone: String,
    pub message: String,
    errors: FormErrors,
}

impl ContactForm {
    pub fn new(client: Arc<IntakeClient>, fallback: Arc<dyn FallbackStore>) -> Self {
        Self {
            client,
            fallback,
            name: String::new(),
            phone: String::new(),
            message: String::new(),
            errors: FormErrors::default(),
        }
    }

    /// Errors from the last submit, for inline field indicators
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Current input, trimmed
    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Clear all inputs
    pub fn reset(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.message.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty() && self.message.is_empty()
    }

    /// Validate and submit the current input.
    pub async fn submit(&mut self) -> FormOutcome {
        let payload = self.payload();

        self.errors = validate_form(&payload);
        if !self.errors.is_valid() {
            return FormOutcome::Invalid(self.errors.clone());
        }

        let result = self.client.submit(&payload).await;

        // Kept locally whatever the server said
        let fallback = self.fallback.clone();
        let record = LocalFallbackRecord::new(&payload, Utc::now());
        match tokio::task::spawn_blocking(move || fallback.append(record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to append local fallback record"),
            Err(e) => warn!(error = %e, "Fallback append task failed"),
        }

        self.reset();

        match result {
            Ok(id) => {
                info!(id, "Contact request submitted");
                FormOutcome::Accepted { id }
            }
            Err(e) => {
                warn!(error = %e, "Submission failed, request kept locally");
                FormOutcome::SavedLocally
            }
        }
    }
}
