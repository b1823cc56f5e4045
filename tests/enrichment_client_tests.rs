/// Integration tests for the birth date client with mocked external APIs.
/// Exercises the HTTP client without hitting the real enrichment service.
use chrono::NaiveDate;
use leads_api::config::Config;
use leads_api::core::enrichment::{BirthDateProvider, EnrichmentContext, EnrichmentError};
use leads_api::core::models::CreateLeadRequest;
use leads_api::core::pipeline::LeadPipeline;
use leads_api::data::lead_store::InMemoryLeadStore;
use leads_api::integrations::services::BirthDateApiService;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config
fn create_test_config(external_api_url: String) -> Config {
    Config {
        database_url: "postgresql://test".to_string(),
        port: 8000,
        external_api_url,
        external_api_path: "/users/1".to_string(),
        external_api_timeout_secs: 10,
        app_title: "Leads Management API".to_string(),
        app_version: "1.0.0".to_string(),
    }
}

fn context() -> EnrichmentContext {
    EnrichmentContext {
        name: "João Silva".to_string(),
        email: "joao.silva@example.com".to_string(),
        phone: "+5511999999999".to_string(),
    }
}

async fn mount_user(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_successful_response() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "firstName": "Emily",
            "birthDate": "1998-2-5"
        })),
    )
    .await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let birth_date = service.fetch_birth_date(&context()).await.unwrap();

    assert_eq!(birth_date, NaiveDate::from_ymd_opt(1998, 2, 5).unwrap());
}

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err, EnrichmentError::Status(500));
}

#[tokio::test]
async fn test_not_found_is_status_failure() {
    let mock_server = MockServer::start().await;
    mount_user(&mock_server, ResponseTemplate::new(404)).await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err, EnrichmentError::Status(404));
}

#[tokio::test]
async fn test_missing_birth_date_is_shape_failure() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })),
    )
    .await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err.kind(), "shape");
}

#[tokio::test]
async fn test_non_json_body_is_shape_failure() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err.kind(), "shape");
}

#[tokio::test]
async fn test_slow_response_is_timeout_failure() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "birthDate": "1998-02-05" }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let service = BirthDateApiService::with_url(
        format!("{}/users/1", mock_server.uri()),
        Duration::from_millis(100),
    )
    .unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err, EnrichmentError::Timeout);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_failure() {
    // Nothing listens on port 1.
    let service =
        BirthDateApiService::with_url("http://127.0.0.1:1/users/1", Duration::from_secs(2))
            .unwrap();
    let err = service.fetch_birth_date(&context()).await.unwrap_err();

    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_circuit_opens_after_consecutive_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5) // The sixth call never reaches the server
        .mount(&mock_server)
        .await;

    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    for _ in 0..5 {
        assert_eq!(
            service.fetch_birth_date(&context()).await.unwrap_err(),
            EnrichmentError::Status(503)
        );
    }

    assert_eq!(
        service.fetch_birth_date(&context()).await.unwrap_err(),
        EnrichmentError::CircuitOpen
    );
}

#[tokio::test]
async fn test_pipeline_stores_lead_when_service_is_slow() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "birthDate": "1998-02-05" }))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let store = Arc::new(InMemoryLeadStore::new());
    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let pipeline = LeadPipeline::new(store.clone(), Arc::new(service))
        .with_enrichment_timeout(Duration::from_millis(100));

    let lead = pipeline
        .create(CreateLeadRequest {
            name: "João Silva".to_string(),
            email: "joao.silva@example.com".to_string(),
            phone: "+5511999999999".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(lead.birth_date, None);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_pipeline_stores_enriched_lead() {
    let mock_server = MockServer::start().await;
    mount_user(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "birthDate": "1998-02-05" })),
    )
    .await;

    let store = Arc::new(InMemoryLeadStore::new());
    let service = BirthDateApiService::new(&create_test_config(mock_server.uri())).unwrap();
    let pipeline = LeadPipeline::new(store, Arc::new(service));

    let lead = pipeline
        .create(CreateLeadRequest {
            name: "João Silva".to_string(),
            email: "joao.silva@example.com".to_string(),
            phone: "+5511999999999".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(lead.birth_date, NaiveDate::from_ymd_opt(1998, 2, 5));
}
