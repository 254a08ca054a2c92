//! CRM core: records, the document store gateway and the services
//!
//! - [`models`] - Lead, Order and DocumentRef records
//! - [`store`] - `CrmStore` trait with PostgreSQL and in-memory backends
//! - [`leads`] / [`orders`] - CRUD and stage/status transitions
//! - [`attachments`] - blob upload/delete bound to document lists
//! - [`metrics`] - counts by stage and status

pub mod attachments;
pub mod error;
pub mod leads;
pub mod metrics;
pub mod models;
pub mod orders;
pub mod store;

pub use attachments::{AttachmentService, Upload};
pub use error::{CrmError, CrmResult, ErrorKind};
pub use leads::{LeadService, StageChange};
pub use metrics::{LeadMetrics, MetricsService, OrderMetrics};
pub use models::{
    DocumentRef, Lead, LeadFilter, LeadStage, NewLead, NewOrder, Order, OrderFilter, OrderPatch,
    OrderStatus, OwnerKind,
};
pub use orders::OrderService;
pub use store::{CrmStore, MemoryStore, PgStore, StoreError};
