//! Lead handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::super::error::ApiResult;
use super::super::state::AppState;
use super::super::types::{LeadCreate, LeadQuery, MessageResponse, StageUpdate};
use crate::crm::Lead;

/// Create a lead
#[utoipa::path(
    post,
    path = "/leads",
    request_body = LeadCreate,
    responses(
        (status = 201, description = "Lead created", body = Lead),
        (status = 422, description = "Malformed body")
    ),
    tag = "Leads"
)]
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeadCreate>,
) -> ApiResult<(StatusCode, Json<Lead>)> {
    let lead = state.leads.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

/// List leads, optionally filtered by stage and follow-up date
#[utoipa::path(
    get,
    path = "/leads",
    params(LeadQuery),
    responses((status = 200, description = "Matching leads", body = [Lead])),
    tag = "Leads"
)]
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeadQuery>,
) -> ApiResult<Json<Vec<Lead>>> {
    Ok(Json(state.leads.list(&query.into()).await?))
}

/// Leads that have any follow-up date set
#[utoipa::path(
    get,
    path = "/leads/followup",
    responses((status = 200, description = "Leads with a follow-up date", body = [Lead])),
    tag = "Leads"
)]
pub async fn list_followup_leads(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Lead>>> {
    Ok(Json(state.leads.list_with_followup().await?))
}

#[utoipa::path(
    get,
    path = "/leads/{id}",
    params(("id" = String, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads"
)]
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Lead>> {
    Ok(Json(state.leads.get(&id).await?))
}

/// Set a lead's stage
///
/// Moving to `Won` also creates an `Order Received` order for the lead.
#[utoipa::path(
    put,
    path = "/leads/{id}/stage",
    params(("id" = String, Path, description = "Lead ID")),
    request_body = StageUpdate,
    responses(
        (status = 200, description = "Updated lead", body = Lead),
        (status = 404, description = "Lead not found"),
        (status = 500, description = "Promotion failed; stage unchanged")
    ),
    tag = "Leads"
)]
pub async fn update_lead_stage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StageUpdate>,
) -> ApiResult<Json<Lead>> {
    let change = state.leads.update_stage(&id, &req.stage).await?;
    Ok(Json(change.lead))
}

/// Delete a lead. Attached documents stay in storage.
#[utoipa::path(
    delete,
    path = "/leads/{id}",
    params(("id" = String, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead deleted", body = MessageResponse),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads"
)]
pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.leads.delete(&id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Lead with ID {} deleted successfully",
        id
    ))))
}
