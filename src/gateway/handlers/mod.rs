//! HTTP handlers

pub mod documents;
pub mod health;
pub mod leads;
pub mod metrics;
pub mod orders;

pub use documents::{delete_document, upload_document};
pub use health::{HealthResponse, health_check, root};
pub use leads::{
    create_lead, delete_lead, get_lead, list_followup_leads, list_leads, update_lead_stage,
};
pub use metrics::{lead_metrics, order_metrics};
pub use orders::{
    create_order, delete_order, get_order, list_orders, update_order, update_order_status,
};
