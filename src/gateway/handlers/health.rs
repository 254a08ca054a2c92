//! Health check and root handlers

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Backing document store
    #[schema(example = "postgres")]
    pub store: String,
    /// Build commit
    #[schema(example = "3f2a9c1")]
    pub version: String,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
}

/// Root greeting
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting")),
    tag = "System"
)]
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Health check endpoint
///
/// Pings the document store on every call.
///
/// - Healthy: 200 OK + {code: 0, data: {...}}
/// - Unhealthy: 503 Service Unavailable + {code: 5001, msg: "unavailable"}
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Document store unreachable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    if let Err(e) = state.store.ping().await {
        tracing::error!("[HEALTH] {} ping failed: {}", state.store.name(), e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                code: error_codes::SERVICE_UNAVAILABLE,
                msg: "unavailable".to_string(),
                data: None,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(HealthResponse {
            status: "ok".to_string(),
            store: state.store.name().to_string(),
            version: env!("GIT_HASH").to_string(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        })),
    )
}
