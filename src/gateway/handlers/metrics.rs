//! Metrics handlers

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::error::ApiResult;
use super::super::state::AppState;
use crate::crm::{LeadMetrics, OrderMetrics};

/// Total leads and counts per known stage
#[utoipa::path(
    get,
    path = "/metrics/leads",
    responses((status = 200, description = "Lead metrics", body = LeadMetrics)),
    tag = "Metrics"
)]
pub async fn lead_metrics(State(state): State<Arc<AppState>>) -> ApiResult<Json<LeadMetrics>> {
    Ok(Json(state.metrics.lead_metrics().await?))
}

/// Total orders and counts per known status
#[utoipa::path(
    get,
    path = "/metrics/orders",
    responses((status = 200, description = "Order metrics", body = OrderMetrics)),
    tag = "Metrics"
)]
pub async fn order_metrics(State(state): State<Arc<AppState>>) -> ApiResult<Json<OrderMetrics>> {
    Ok(Json(state.metrics.order_metrics().await?))
}
