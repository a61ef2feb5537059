//! API route handlers

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, State},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info, warn};

use super::{error::ApiError, AppState};
use crate::types::{ContactPayload, ContactRequest};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// Response for an accepted contact request
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub id: i64,
}

/// Largest accepted contact body
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// POST /api/contact
///
/// The body stream is left unread until the caller has been admitted, and is
/// then buffered up to `MAX_BODY_BYTES`.
pub async fn submit_contact(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Body,
) -> Result<Json<SubmitResponse>, ApiError> {
    let identity = addr.ip().to_string();
    if !state.gate.admit(&identity) {
        return Err(ApiError::RateLimited);
    }

    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        warn!(error = %e, %identity, "Failed to read contact body");
        ApiError::PayloadTooLarge
    })?;

    let request = ContactPayload::from_body(&body)
        .into_new_request()
        .map_err(ApiError::Validation)?;

    let id = state.store.insert(request).await.map_err(|e| {
        error!(error = %e, "Failed to store contact request");
        ApiError::Storage
    })?;

    info!(id, %identity, "Contact request accepted");
    Ok(Json(SubmitResponse { ok: true, id }))
}

/// Response listing stored requests
#[derive(Debug, Serialize)]
pub struct RequestsResponse {
    pub ok: bool,
    pub data: Vec<ContactRequest>,
}

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<RequestsResponse>, ApiError> {
    let data = state.store.list_all().await.map_err(|e| {
        error!(error = %e, "Failed to list contact requests");
        ApiError::Database
    })?;

    Ok(Json(RequestsResponse { ok: true, data }))
}
