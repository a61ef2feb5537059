//! Admin status line for the stored-requests view

use crate::client::IntakeClient;
use crate::types::{ContactRequest, RequestsSnapshot};

pub const MSG_LOADING: &str = "Жүктелуде...";
pub const MSG_EMPTY: &str = "Қазір сұраныс жоқ.";
pub const MSG_FAILED: &str = "Жүктеу қатесі. Серверді тексеріңіз.";

/// State of the admin view after a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminStatus {
    Loading,
    Empty,
    Loaded(Vec<ContactRequest>),
    Failed,
}

impl AdminStatus {
    pub fn status_text(&self) -> String {
        match self {
            AdminStatus::Loading => MSG_LOADING.to_string(),
            AdminStatus::Empty => MSG_EMPTY.to_string(),
            AdminStatus::Loaded(rows) => format!("Барлығы: {}", rows.len()),
            AdminStatus::Failed => MSG_FAILED.to_string(),
        }
    }

    /// Rows to show; none unless loaded
    pub fn rows(&self) -> &[ContactRequest] {
        match self {
            AdminStatus::Loaded(rows) => rows,
            _ => &[],
        }
    }
}

/// Load stored requests. Never fails: a fetch error becomes `Failed`.
pub async fn load_requests(client: &IntakeClient) -> AdminStatus {
    match client.list_requests().await {
        Ok(RequestsSnapshot::Empty) => AdminStatus::Empty,
        Ok(RequestsSnapshot::Loaded(rows)) => AdminStatus::Loaded(rows),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load stored requests");
            AdminStatus::Failed
        }
    }
}
