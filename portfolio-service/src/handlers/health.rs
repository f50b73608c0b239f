use crate::startup::AppState;
use axum::{extract::State, http::Uri, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "portfolio-service",
        "version": env!("CARGO_PKG_VERSION"),
        "completion_provider": if state.provider.is_some() { "configured" } else { "unconfigured" }
    }))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri))
}
