//! HTTP adapter: the JSON request/response contract over the analyzer core.

use crate::analyzer::{AnalysisError, SatelliteAnalyzer};
use crate::model::RegistryState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

pub struct AppState {
    pub analyzer: SatelliteAnalyzer,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn analyze(State(state): State<SharedState>, body: Option<Json<Value>>) -> Response {
    let lines = body.as_ref().and_then(|Json(v)| {
        Some((
            v.get("TLE_LINE1")?.as_str()?,
            v.get("TLE_LINE2")?.as_str()?,
        ))
    });
    let Some((line1, line2)) = lines else {
        return error_body(StatusCode::BAD_REQUEST, "Invalid input. TLE data is required.");
    };

    match state.analyzer.analyze(line1, line2) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(AnalysisError::Tle(e)) => {
            warn!(error = %e, "rejected malformed TLE");
            error_body(StatusCode::BAD_REQUEST, "Failed to parse TLE data.")
        }
        Err(AnalysisError::ModelLoad(e)) => {
            error_body(StatusCode::SERVICE_UNAVAILABLE, &e.to_string())
        }
        Err(AnalysisError::Scoring(e)) => {
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn health(State(state): State<SharedState>) -> Response {
    let models = state.analyzer.registry_state();
    let status = if models == RegistryState::Failed {
        "degraded"
    } else {
        "ok"
    };
    (
        StatusCode::OK,
        Json(json!({
            "status": status,
            "models": models,
            "checked_at": chrono::Utc::now(),
        })),
    )
        .into_response()
}
