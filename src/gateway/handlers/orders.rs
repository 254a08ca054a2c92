//! Order handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::super::error::ApiResult;
use super::super::state::AppState;
use super::super::types::{MessageResponse, OrderCreate, OrderQuery, OrderUpdate, StatusUpdate};
use crate::crm::Order;

/// Create an order directly (no lead check)
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderCreate,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 422, description = "Malformed body")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/orders",
    params(OrderQuery),
    responses((status = 200, description = "Matching orders", body = [Order])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list(&query.into()).await?))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get(&id).await?))
}

/// Partially update an order
///
/// Only the fields present in the body are written.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<OrderUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.update(&id, &req.into()).await?))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(("id" = String, Path, description = "Order ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.update_status(&id, &req.status).await?))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.orders.delete(&id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Order with ID {} deleted successfully",
        id
    ))))
}
