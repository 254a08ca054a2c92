//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::crm::{Lead, LeadMetrics, Order, OrderMetrics};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    LeadCreate, MessageResponse, OrderCreate, OrderUpdate, StageUpdate, StatusUpdate,
    UploadDocumentForm, UploadResponse,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leadflow CRM API",
        version = "1.0.0",
        description = "Lead pipeline, order tracking and document attachments.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::root,
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::leads::create_lead,
        crate::gateway::handlers::leads::list_leads,
        crate::gateway::handlers::leads::list_followup_leads,
        crate::gateway::handlers::leads::get_lead,
        crate::gateway::handlers::leads::update_lead_stage,
        crate::gateway::handlers::leads::delete_lead,
        crate::gateway::handlers::orders::create_order,
        crate::gateway::handlers::orders::list_orders,
        crate::gateway::handlers::orders::get_order,
        crate::gateway::handlers::orders::update_order,
        crate::gateway::handlers::orders::update_order_status,
        crate::gateway::handlers::orders::delete_order,
        crate::gateway::handlers::metrics::lead_metrics,
        crate::gateway::handlers::metrics::order_metrics,
        crate::gateway::handlers::documents::upload_document,
        crate::gateway::handlers::documents::delete_document,
    ),
    components(
        schemas(
            HealthResponse,
            Lead,
            Order,
            LeadCreate,
            StageUpdate,
            OrderCreate,
            OrderUpdate,
            StatusUpdate,
            LeadMetrics,
            OrderMetrics,
            MessageResponse,
            UploadResponse,
            UploadDocumentForm,
        )
    ),
    tags(
        (name = "Leads", description = "Lead pipeline"),
        (name = "Orders", description = "Orders promoted from won leads"),
        (name = "Metrics", description = "Counts by stage and status"),
        (name = "Documents", description = "File attachments for leads and orders"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
