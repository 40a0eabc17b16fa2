//! Integration tests for the VoteSense HTTP routes

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use votesense_core::Result;
use votesense_server::{create_router, AppState, ModelLoadMode, ServerConfig};
use votesense_signals::{Classifier, LinearModel, ModelLoader, RawPrediction, StaticModelLoader};

const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/voter-feedback.yaml");

/// Returns a label index outside the contract
struct MalformedClassifier;

impl Classifier for MalformedClassifier {
    fn predict(&self, _text: &str) -> Result<RawPrediction> {
        Ok(RawPrediction::new(7, vec![0.2, 0.3, 0.5]))
    }

    fn name(&self) -> &str {
        "malformed"
    }
}

async fn app_with(config: ServerConfig, loader: Arc<dyn ModelLoader>) -> Router {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::with_loader(config, loader, handle).await.unwrap();
    create_router(state)
}

async fn app() -> Router {
    let model = LinearModel::from_file(MODEL_PATH).unwrap();
    app_with(ServerConfig::default(), Arc::new(StaticModelLoader::new(Arc::new(model)))).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .await
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "service": "votesense"}));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = app()
        .await
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_returns_full_result() {
    let (status, body) = post_json(
        app().await,
        "/analyze",
        json!({"text": "Love the transparency of seeing my vote on the blockchain! 👍"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "positive");
    assert_eq!(body["original_text"], "Love the transparency of seeing my vote on the blockchain! 👍");
    assert_eq!(body["debug"]["emoji_score"], 2);
    assert_eq!(body["key_terms"]["positive"], json!(["love"]));

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn test_analyze_missing_text() {
    let (status, body) = post_json(app().await, "/analyze", json!({"message": "hi"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Missing text input"));

    let (status, _) = post_raw(app().await, "/analyze", "not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_invalid_text() {
    for text in [json!(""), json!(42), json!(["a"])] {
        let (status, body) = post_json(app().await, "/analyze", json!({ "text": text })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid text input"));
    }
}

#[tokio::test]
async fn test_analyze_accepts_whitespace_only_text() {
    let (status, body) = post_json(app().await, "/analyze", json!({"text": "   "})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original_text"], "   ");
    assert_eq!(body["sentiment"], "neutral");
}

#[tokio::test]
async fn test_batch_analyze_with_statistics() {
    let texts = json!([
        "Secure and easy, great experience 👍",
        "The site was slow and kept crashing 😡",
        "I cast my ballot",
    ]);
    let (status, body) = post_json(app().await, "/batch-analyze", json!({ "texts": texts })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][1]["original_text"], "The site was slow and kept crashing 😡");
    assert_eq!(body["statistics"]["total"], 3);
    assert_eq!(body["statistics"]["distribution"]["positive"]["count"], 1);
    assert_eq!(body["statistics"]["distribution"]["negative"]["count"], 1);
}

#[tokio::test]
async fn test_batch_analyze_empty_list() {
    let (status, body) = post_json(app().await, "/batch-analyze", json!({"texts": []})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statistics"]["total"], 0);
    assert_eq!(body["statistics"]["overall_sentiment_score"], 0.0);
}

#[tokio::test]
async fn test_batch_analyze_rejects_bad_payloads() {
    let (status, body) = post_json(app().await, "/batch-analyze", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Missing texts input"));

    for texts in [json!("one text"), json!(["ok", 3]), json!({"a": "b"})] {
        let (status, body) = post_json(app().await, "/batch-analyze", json!({ "texts": texts })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid texts input"));
    }
}

#[tokio::test]
async fn test_batch_over_limit_is_rejected() {
    let model = LinearModel::from_file(MODEL_PATH).unwrap();
    let config = ServerConfig {
        max_batch_size: 2,
        ..ServerConfig::default()
    };
    let app = app_with(config, Arc::new(StaticModelLoader::new(Arc::new(model)))).await;

    let (status, _) = post_json(app, "/batch-analyze", json!({"texts": ["a", "b", "c"]})).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_malformed_model_output_is_server_error() {
    let config = ServerConfig {
        model_load: ModelLoadMode::Lazy,
        ..ServerConfig::default()
    };
    let app = app_with(config, Arc::new(StaticModelLoader::new(Arc::new(MalformedClassifier)))).await;

    let (status, body) = post_json(app, "/analyze", json!({"text": "fine"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_lazy_model_load_failure_is_server_error() {
    let config = ServerConfig {
        model_load: ModelLoadMode::Lazy,
        ..ServerConfig::default()
    };
    let loader = Arc::new(votesense_signals::FileModelLoader::new("/missing/model.yaml"));
    let app = app_with(config, loader).await;

    let (status, body) = post_json(app, "/analyze", json!({"text": "hello"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model"));
}

#[tokio::test]
async fn test_eager_model_load_failure_aborts_startup() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let loader = Arc::new(votesense_signals::FileModelLoader::new("/missing/model.yaml"));
    let result = AppState::with_loader(ServerConfig::default(), loader, handle).await;
    assert!(result.is_err());
}
