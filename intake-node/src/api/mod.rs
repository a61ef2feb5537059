//! HTTP API
//!
//! Provides:
//! - `POST /api/contact` - admit, validate and store a contact request
//! - `GET /api/requests` - list stored requests, newest first
//! - `GET /health`

pub mod error;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::admission::AdmissionGate;
use crate::storage::RequestStore;

/// State shared across handlers. Built once in `main` and injected.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AdmissionGate>,
    pub store: Arc<dyn RequestStore>,
}

impl AppState {
    pub fn new(gate: Arc<AdmissionGate>, store: Arc<dyn RequestStore>) -> Self {
        Self { gate, store }
    }
}

/// Create the API router.
///
/// When `static_dir` is set, unmatched paths fall through to files in it.
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/api/contact", post(routes::submit_contact))
        .route("/api/requests", get(routes::list_requests))
        .route("/health", get(routes::health));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
