//! HTTP client for the intake API

use std::time::Duration;

use reqwest::{header, Client};
use tracing::debug;

use crate::error::{Result, SubmissionError, GENERIC_SERVER_ERROR};
use crate::types::{ClientConfig, ContactPayload, Envelope, RequestsSnapshot};

/// HTTP client for the intake API
///
/// # Example
///
/// ```rust,no_run
/// use intake_client::{ClientConfig, ContactPayload, IntakeClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntakeClient::new(ClientConfig {
///     base_url: "http://localhost:3000".into(),
///     ..Default::default()
/// })?;
///
/// let id = client
///     .submit(&ContactPayload {
///         name: "Aigerim".into(),
///         phone: "87001234567".into(),
///         message: "Need a landing page".into(),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct IntakeClient {
    config: ClientConfig,
    client: Client,
}

impl IntakeClient {
    /// Create a new intake client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send a contact request. Returns the id assigned by the server.
    pub async fn submit(&self, payload: &ContactPayload) -> Result<i64> {
        let url = format!("{}/api/contact", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let envelope = self.handle_response(response).await?;
        let id = envelope
            .id
            .ok_or_else(|| SubmissionError::InvalidResponse("missing id".to_string()))?;

        debug!(id, "Contact request accepted by server");
        Ok(id)
    }

    /// Fetch all stored requests, newest first.
    pub async fn list_requests(&self) -> Result<RequestsSnapshot> {
        let url = format!("{}/api/requests", self.config.base_url);

        let response = self.client.get(&url).send().await?;
        let envelope = self.handle_response(response).await?;

        match envelope.data {
            Some(data) if data.is_empty() => Ok(RequestsSnapshot::Empty),
            Some(data) => Ok(RequestsSnapshot::Loaded(data)),
            None => Err(SubmissionError::InvalidResponse("missing data".to_string())),
        }
    }

    // ==================== Helpers ====================

    async fn handle_response(&self, response: reqwest::Response) -> Result<Envelope> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<Envelope>()
                .await
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
            return Err(SubmissionError::Rejected { status, message });
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;
        if !envelope.ok {
            return Err(SubmissionError::InvalidResponse(
                envelope
                    .message
                    .unwrap_or_else(|| "ok flag not set".to_string()),
            ));
        }

        Ok(envelope)
    }
}
