use std::sync::Arc;

use crate::blob::BlobStore;
use crate::crm::{AttachmentService, CrmStore, LeadService, MetricsService, OrderService};

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    pub leads: LeadService,
    pub orders: OrderService,
    pub attachments: AttachmentService,
    pub metrics: MetricsService,
    /// Backing store, used by the health probe
    pub store: Arc<dyn CrmStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CrmStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            leads: LeadService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            attachments: AttachmentService::new(store.clone(), blobs),
            metrics: MetricsService::new(store.clone()),
            store,
        }
    }
}
