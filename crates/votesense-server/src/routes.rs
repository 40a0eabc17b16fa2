//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::state::AppState;
use votesense_engine::{AnalysisResult, BatchStatistics};

/// Upper bound on request bodies
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

const MISSING_TEXT: &str = "Missing text input. Please provide a JSON payload with a \"text\" field.";
const INVALID_TEXT: &str = "Invalid text input. Please provide a non-empty string.";
const MISSING_TEXTS: &str = "Missing texts input. Please provide a JSON payload with a \"texts\" field.";
const INVALID_TEXTS: &str = "Invalid texts input. Please provide an array of strings.";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/analyze", post(analyze))
        .route("/batch-analyze", post(batch_analyze))
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok", "service": "votesense"}))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn fallback() -> Response {
    AppError::NotFound.into_response()
}

/// Single-text analysis
async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    metrics::counter!("votesense_requests_total", "endpoint" => "analyze").increment(1);

    let payload = payload(body, MISSING_TEXT)?;
    let text = match payload.get("text") {
        None | Some(Value::Null) => return Err(AppError::InvalidRequest(MISSING_TEXT.to_string())),
        Some(Value::String(text)) if !text.is_empty() => text.as_str(),
        Some(_) => return Err(AppError::InvalidRequest(INVALID_TEXT.to_string())),
    };

    let start = Instant::now();
    let analyzer = state.analyzer.get_or_init().await?;
    let result = analyzer.analyze_text(text)?;

    record_latency(start, 1);
    metrics::counter!("votesense_sentiment_total", "label" => result.sentiment.as_str()).increment(1);

    Ok(Json(result))
}

/// Batch analysis response
#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<AnalysisResult>,
    statistics: BatchStatistics,
}

/// Batch analysis with aggregate statistics
async fn batch_analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    metrics::counter!("votesense_requests_total", "endpoint" => "batch_analyze").increment(1);

    let mut payload = payload(body, MISSING_TEXTS)?;
    let texts = match payload.get_mut("texts").map(Value::take) {
        None | Some(Value::Null) => return Err(AppError::InvalidRequest(MISSING_TEXTS.to_string())),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                _ => Err(AppError::InvalidRequest(INVALID_TEXTS.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(AppError::InvalidRequest(INVALID_TEXTS.to_string())),
    };

    let limit = state.config.max_batch_size;
    if texts.len() > limit {
        return Err(AppError::PayloadTooLarge(format!(
            "Batch of {} texts exceeds the limit of {}",
            texts.len(),
            limit
        )));
    }

    let start = Instant::now();
    let count = texts.len();
    let analyzer = state.analyzer.get_or_init().await?;
    let batch = analyzer.analyze_batch_concurrent(texts).await?;

    record_latency(start, count);
    for result in &batch.results {
        metrics::counter!("votesense_sentiment_total", "label" => result.sentiment.as_str()).increment(1);
    }
    debug!(count, "Batch request complete");

    Ok(Json(BatchResponse {
        results: batch.results,
        statistics: batch.statistics,
    }))
}

/// Unwrap a JSON object body; anything unreadable counts as missing input
fn payload(body: Result<Json<Value>, JsonRejection>, missing: &str) -> Result<Value, AppError> {
    match body {
        Ok(Json(value @ Value::Object(_))) => Ok(value),
        Ok(Json(_)) => Err(AppError::InvalidRequest(missing.to_string())),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError::InvalidRequest(missing.to_string()))
        }
    }
}

/// Record mean per-text latency
fn record_latency(start: Instant, texts: usize) {
    let per_text = start.elapsed().as_micros() as f64 / texts.max(1) as f64;
    metrics::histogram!("votesense_analysis_latency_us").record(per_text);
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    PayloadTooLarge(String),
    NotFound,
    Analysis(votesense_core::Error),
}

impl From<votesense_core::Error> for AppError {
    fn from(err: votesense_core::Error) -> Self {
        AppError::Analysis(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, "invalid_request"),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, "payload_too_large"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string(), "not_found"),
            AppError::Analysis(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, INVALID_TEXT.to_string(), err.kind())
            }
            AppError::Analysis(err) => {
                error!(kind = err.kind(), "Analysis failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), err.kind())
            }
        };

        if status.is_client_error() {
            warn!(kind, "Rejected request: {}", message);
        }
        metrics::counter!("votesense_errors_total", "kind" => kind).increment(1);

        (status, Json(json!({ "error": message }))).into_response()
    }
}
