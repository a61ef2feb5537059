//! Submission flow integration tests
//!
//! Server behaviour is mocked with wiremock; network failure is simulated by
//! pointing the client at a port nobody listens on.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intake_client::{
    load_requests, AdminStatus, ClientConfig, ContactForm, ContactPayload, FallbackStore,
    FileFallbackStore, FormField, FormOutcome, IntakeClient, MemoryFallbackStore,
    RequestsSnapshot, SubmissionError, MSG_ACCEPTED, MSG_SAVED_LOCALLY,
};

fn client(base_url: &str) -> Arc<IntakeClient> {
    let client = IntakeClient::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 2,
    })
    .unwrap();
    assert_eq!(client.base_url(), base_url);
    Arc::new(client)
}

/// Base URL of a local port with no listener
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn fill(form: &mut ContactForm) {
    form.name = " Aigerim ".to_string();
    form.phone = "87001234567".to_string();
    form.message = "Need a landing page".to_string();
}

// =============================================================================
// ContactForm
// =============================================================================

#[tokio::test]
async fn test_submit_with_server_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .and(body_json(json!({
            "name": "Aigerim",
            "phone": "87001234567",
            "message": "Need a landing page"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let fallback = Arc::new(MemoryFallbackStore::new());
    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    fill(&mut form);

    let outcome = form.submit().await;

    assert_eq!(outcome, FormOutcome::Accepted { id: 1 });
    assert_eq!(outcome.user_message(), Some(MSG_ACCEPTED));
    assert!(form.is_blank());

    let records = fallback.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Aigerim");
}

#[tokio::test]
async fn test_submit_with_server_unreachable() {
    let dir = TempDir::new().unwrap();
    let fallback = Arc::new(FileFallbackStore::new(dir.path()));
    let mut form = ContactForm::new(client(&unreachable_url()), fallback.clone());
    fill(&mut form);

    let outcome = form.submit().await;

    assert_eq!(outcome, FormOutcome::SavedLocally);
    assert_eq!(outcome.user_message(), Some(MSG_SAVED_LOCALLY));
    assert!(form.is_blank());
    assert_eq!(fallback.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_rejected_by_server_is_saved_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"ok": false, "message": "Too many requests. Try later."})),
        )
        .mount(&server)
        .await;

    let fallback = Arc::new(MemoryFallbackStore::new());
    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    fill(&mut form);

    assert_eq!(form.submit().await, FormOutcome::SavedLocally);
    assert!(form.is_blank());
    assert_eq!(fallback.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_timeout_is_a_failure_and_still_saved_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "id": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let fallback = Arc::new(MemoryFallbackStore::new());
    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    fill(&mut form);

    assert_eq!(form.submit().await, FormOutcome::SavedLocally);
    assert_eq!(fallback.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let fallback = Arc::new(MemoryFallbackStore::new());
    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    form.name = "A".to_string();
    form.phone = "12345abcde".to_string();
    form.message = "hi".to_string();

    let outcome = form.submit().await;

    match outcome {
        FormOutcome::Invalid(errors) => {
            assert!(errors.is_invalid(FormField::Phone));
            assert!(!errors.is_invalid(FormField::Name));
        }
        other => panic!("expected Invalid, got {:?}", other),
    }
    assert!(form.errors().is_invalid(FormField::Phone));
    // Input kept so the user can fix it
    assert_eq!(form.phone, "12345abcde");
    assert!(fallback.load().unwrap().is_empty());
}

#[tokio::test]
async fn test_every_attempt_is_kept_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": 7})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fallback = Arc::new(FileFallbackStore::new(dir.path()));

    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    fill(&mut form);
    form.submit().await;

    let mut offline = ContactForm::new(client(&unreachable_url()), fallback.clone());
    fill(&mut offline);
    offline.submit().await;

    assert_eq!(fallback.load().unwrap().len(), 2);
}

#[tokio::test]
async fn test_corrupt_fallback_file_does_not_change_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": 3})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fallback = Arc::new(FileFallbackStore::new(dir.path()));
    std::fs::write(fallback.path(), b"{broken").unwrap();

    let mut form = ContactForm::new(client(&server.uri()), fallback.clone());
    fill(&mut form);

    assert_eq!(form.submit().await, FormOutcome::Accepted { id: 3 });
    assert!(form.is_blank());
    assert_eq!(std::fs::read(fallback.path()).unwrap(), b"{broken");
}

// =============================================================================
// IntakeClient
// =============================================================================

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "message": "Validation failed",
            "errors": ["phone_min"]
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .submit(&ContactPayload::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Rejected { status: 400, .. }));
    assert_eq!(err.server_message(), Some("Validation failed"));
}

#[tokio::test]
async fn test_rejection_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .submit(&ContactPayload::default())
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Server error"));
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .submit(&ContactPayload::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_is_network_error() {
    let err = client(&unreachable_url())
        .submit(&ContactPayload::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Network(_)));
}

#[tokio::test]
async fn test_list_requests_distinguishes_empty_from_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "data": []})))
        .mount(&server)
        .await;

    let snapshot = client(&server.uri()).list_requests().await.unwrap();
    assert_eq!(snapshot, RequestsSnapshot::Empty);

    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"ok": false, "message": "Database error"})),
        )
        .mount(&failing)
        .await;

    let err = client(&failing.uri()).list_requests().await.unwrap_err();
    assert_eq!(err.server_message(), Some("Database error"));
}

#[tokio::test]
async fn test_admin_status_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": [
                {"id": 2, "name": "B", "phone": "87001234567", "message": "m", "created_at": "2026-01-01T00:00:01.000Z"},
                {"id": 1, "name": "A", "phone": "87001234567", "message": "m", "created_at": "2026-01-01T00:00:00.000Z"}
            ]
        })))
        .mount(&server)
        .await;

    let status = load_requests(&client(&server.uri())).await;
    assert_eq!(status.status_text(), "Барлығы: 2");
    assert_eq!(status.rows()[0].id, 2);

    let status = load_requests(&client(&unreachable_url())).await;
    assert_eq!(status, AdminStatus::Failed);
    assert!(status.rows().is_empty());
}
