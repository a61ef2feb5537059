//! API error responses
//!
//! Every failure leaves the handler as `{ok: false, message}` JSON, with the
//! field error list added for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::validation::FieldErrors;

/// Error body sent to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 with per-field codes
    Validation(FieldErrors),
    /// 429, no retry hint
    RateLimited,
    /// 413, body over the size limit or unreadable
    PayloadTooLarge,
    /// 500 on the write path
    Storage,
    /// 500 on the read path
    Database,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage | ApiError::Database => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Validation failed",
            ApiError::RateLimited => "Too many requests. Try later.",
            ApiError::PayloadTooLarge => "Payload too large",
            ApiError::Storage => "Storage error",
            ApiError::Database => "Database error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self {
            ApiError::Validation(errors) => Some(errors.wire_codes()),
            _ => None,
        };

        let body = ErrorBody {
            ok: false,
            message: self.message().to_string(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}
