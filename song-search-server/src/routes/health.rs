use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    record_store: String,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.store_loaded().await {
        (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready".to_string(),
                record_store: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "not_ready".to_string(),
                record_store: "missing".to_string(),
            }),
        )
    }
}
