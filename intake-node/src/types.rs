//! Contact request types shared by the API and storage layers

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{validate, FieldErrors};

/// Body of `POST /api/contact` as received from the wire.
///
/// Every field is optional: a missing field, `null`, or a non-string value
/// is treated as absent and reported by validation as `required`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ContactPayload {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            phone: Some(phone.into()),
            message: Some(message.into()),
        }
    }

    /// Parse a request body without ever failing.
    ///
    /// Malformed JSON or a non-object body yields an empty payload.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            name: text("name"),
            phone: text("phone"),
            message: text("message"),
        }
    }

    /// Validate and trim into a record ready for storage.
    pub fn into_new_request(self) -> Result<NewContactRequest, FieldErrors> {
        let errors = validate(&self);
        if !errors.is_empty() {
            return Err(errors);
        }

        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();

        Ok(NewContactRequest {
            name: trimmed(self.name),
            phone: trimmed(self.phone),
            message: trimmed(self.message),
        })
    }
}

/// A validated, trimmed contact request that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactRequest {
    pub name: String,
    pub phone: String,
    pub message: String,
}

/// A stored contact request as returned by `GET /api/requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Assigned by the store, strictly increasing, never reused
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: String,
    /// RFC 3339 UTC with milliseconds, assigned at acceptance time
    pub created_at: String,
}
