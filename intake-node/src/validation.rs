//! Server-side contact payload validation
//!
//! Rules, checked in this order with at most one error per field:
//! - `name`: `required` if empty after trim
//! - `message`: `required` if empty after trim
//! - `phone`: `required` if empty, else `digits` on any non-digit, else `min` below 10 digits

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::ContactPayload;

/// Minimum number of digits in a phone number
pub const PHONE_MIN_DIGITS: usize = 10;

/// Validated field. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Message,
    Phone,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Message => "message",
            Field::Phone => "phone",
        }
    }
}

/// Per-field error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    Required,
    Digits,
    Min,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Digits => "digits",
            ErrorCode::Min => "min",
        }
    }
}

/// Field errors from one validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ErrorCode>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<ErrorCode> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ErrorCode)> + '_ {
        self.0.iter().map(|(f, c)| (*f, *c))
    }

    /// Error list as sent in a 400 response.
    ///
    /// `required` is reported as the bare field name, anything else as
    /// `field_code` (`phone_digits`, `phone_min`).
    pub fn wire_codes(&self) -> Vec<String> {
        self.iter()
            .map(|(field, code)| match code {
                ErrorCode::Required => field.as_str().to_string(),
                other => format!("{}_{}", field.as_str(), other.as_str()),
            })
            .collect()
    }

    fn insert(&mut self, field: Field, code: ErrorCode) {
        self.0.entry(field).or_insert(code);
    }
}

/// Validate a contact payload. Pure, no side effects.
pub fn validate(payload: &ContactPayload) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if trimmed(&payload.name).is_empty() {
        errors.insert(Field::Name, ErrorCode::Required);
    }
    if trimmed(&payload.message).is_empty() {
        errors.insert(Field::Message, ErrorCode::Required);
    }

    let phone = trimmed(&payload.phone);
    if phone.is_empty() {
        errors.insert(Field::Phone, ErrorCode::Required);
    } else if !phone.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(Field::Phone, ErrorCode::Digits);
    } else if phone.len() < PHONE_MIN_DIGITS {
        errors.insert(Field::Phone, ErrorCode::Min);
    }

    errors
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}
