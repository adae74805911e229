//! Integration tests for the HTTP generation client against a local responder.

use super::test_utils::{coffee_plan_payload, coffee_roasters, serve_once, silent_listener};
use presence_planner::config::ServiceConfig;
use presence_planner::provider::{ApiCredential, GeminiClient};
use presence_planner::{GenerationError, PlanGenerator, ServiceError};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn service_config(addr: SocketAddr, timeout_secs: u64) -> ServiceConfig {
    ServiceConfig {
        base_url: format!("http://{}/v1beta", addr),
        request_timeout_secs: timeout_secs,
        connect_timeout_secs: timeout_secs,
        ..ServiceConfig::default()
    }
}

fn generator(config: &ServiceConfig) -> PlanGenerator {
    let client = GeminiClient::new(config, ApiCredential::new("test-key")).unwrap();
    PlanGenerator::from_config(Arc::new(client), config).unwrap()
}

fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 480, "totalTokenCount": 600 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_exchange_and_wire_format() {
    let payload = coffee_plan_payload();
    let (addr, server) = serve_once("200 OK", envelope(&payload.to_string()));
    let config = service_config(addr, 10);

    let plan = generator(&config).generate(&coffee_roasters()).await.unwrap();
    assert_eq!(plan.seo_keywords.len(), 12);

    let request = server.join().unwrap();
    assert!(request
        .head
        .starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent HTTP/1.1"));
    assert!(request
        .head
        .to_ascii_lowercase()
        .contains("x-goog-api-key: test-key"));

    let body: Value = serde_json::from_str(&request.body).unwrap();
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("Business Name: Artisan Coffee Roasters"));
    let generation_config = &body["generationConfig"];
    assert_eq!(generation_config["responseMimeType"], "application/json");
    assert_eq!(generation_config["responseSchema"]["type"], "OBJECT");
    assert!((generation_config["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    assert!((generation_config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn test_server_error_is_service_failure() {
    let (addr, server) = serve_once(
        "503 Service Unavailable",
        json!({ "error": { "code": 503, "message": "The model is overloaded." } }).to_string(),
    );
    let config = service_config(addr, 10);

    let err = generator(&config)
        .generate(&coffee_roasters())
        .await
        .unwrap_err();
    server.join().unwrap();

    match err {
        GenerationError::ServiceFailure(ServiceError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected status failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_auth_rejection_is_service_failure() {
    let (addr, server) = serve_once(
        "401 Unauthorized",
        json!({ "error": { "code": 401, "message": "API key not valid." } }).to_string(),
    );
    let config = service_config(addr, 10);

    let err = generator(&config)
        .generate(&coffee_roasters())
        .await
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(
        err,
        GenerationError::ServiceFailure(ServiceError::Authentication(_))
    ));
}

#[tokio::test]
async fn test_non_json_candidate_text_is_invalid_response() {
    let (addr, server) = serve_once("200 OK", envelope("Here is your plan: be awesome."));
    let config = service_config(addr, 10);

    let err = generator(&config)
        .generate(&coffee_roasters())
        .await
        .unwrap_err();
    server.join().unwrap();

    assert_eq!(err.raw_payload(), Some("Here is your plan: be awesome."));
}

#[tokio::test]
async fn test_unresponsive_service_times_out_within_bound() {
    let (addr, _listener) = silent_listener();
    let config = service_config(addr, 1);
    let started = Instant::now();

    let err = generator(&config)
        .generate(&coffee_roasters())
        .await
        .unwrap_err();

    assert!(
        matches!(err, GenerationError::ServiceFailure(ServiceError::Timeout(_))),
        "expected timeout, got {:?}",
        err
    );
    assert!(started.elapsed() < Duration::from_secs(10));
}
