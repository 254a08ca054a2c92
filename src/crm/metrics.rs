//! Metrics Service - lead counts by stage, order counts by status
//!
//! One count for the total plus one per known stage/status. Records whose
//! stage or status is outside the known set count only toward the total.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use super::error::CrmResult;
use super::models::{LeadStage, OrderStatus};
use super::store::CrmStore;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeadMetrics {
    #[schema(example = 12)]
    pub total_leads: u64,
    /// Count per known stage; every known stage is present
    pub leads_by_stage: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderMetrics {
    #[schema(example = 5)]
    pub total_orders: u64,
    /// Count per known status; every known status is present
    pub orders_by_status: BTreeMap<String, u64>,
}

#[derive(Clone)]
pub struct MetricsService {
    store: Arc<dyn CrmStore>,
}

impl MetricsService {
    pub fn new(store: Arc<dyn CrmStore>) -> Self {
        Self { store }
    }

    pub async fn lead_metrics(&self) -> CrmResult<LeadMetrics> {
        let total_leads = self.store.count_leads(None).await?;
        let mut leads_by_stage = BTreeMap::new();
        for stage in LeadStage::ALL {
            let count = self.store.count_leads(Some(stage.as_str())).await?;
            leads_by_stage.insert(stage.as_str().to_string(), count);
        }
        Ok(LeadMetrics {
            total_leads,
            leads_by_stage,
        })
    }

    pub async fn order_metrics(&self) -> CrmResult<OrderMetrics> {
        let total_orders = self.store.count_orders(None).await?;
        let mut orders_by_status = BTreeMap::new();
        for status in OrderStatus::ALL {
            let count = self.store.count_orders(Some(status.as_str())).await?;
            orders_by_status.insert(status.as_str().to_string(), count);
        }
        Ok(OrderMetrics {
            total_orders,
            orders_by_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::models::{NewLead, NewOrder, OrderPatch};
    use crate::crm::store::MemoryStore;

    #[tokio::test]
    async fn test_empty_store_reports_all_buckets() {
        let svc = MetricsService::new(Arc::new(MemoryStore::new()));
        let leads = svc.lead_metrics().await.unwrap();
        assert_eq!(leads.total_leads, 0);
        assert_eq!(leads.leads_by_stage.len(), 6);
        assert!(leads.leads_by_stage.values().all(|&n| n == 0));

        let orders = svc.order_metrics().await.unwrap();
        assert_eq!(orders.orders_by_status.len(), 4);
    }

    #[tokio::test]
    async fn test_out_of_set_stage_counts_only_in_total() {
        let store = Arc::new(MemoryStore::new());
        store.insert_lead(NewLead::new("A", "x")).await.unwrap();
        let b = store.insert_lead(NewLead::new("B", "y")).await.unwrap();
        store.set_lead_stage(&b.id, "Won").await.unwrap();
        let c = store.insert_lead(NewLead::new("C", "z")).await.unwrap();
        store.set_lead_stage(&c.id, "On Hold").await.unwrap();

        let metrics = MetricsService::new(store).lead_metrics().await.unwrap();
        assert_eq!(metrics.total_leads, 3);
        assert_eq!(metrics.leads_by_stage["New"], 1);
        assert_eq!(metrics.leads_by_stage["Won"], 1);
        assert_eq!(metrics.leads_by_stage.values().sum::<u64>(), 2);
        assert!(!metrics.leads_by_stage.contains_key("On Hold"));
    }

    #[tokio::test]
    async fn test_order_status_buckets() {
        let store = Arc::new(MemoryStore::new());
        let a = store.insert_order(NewOrder::new("L1")).await.unwrap();
        store.insert_order(NewOrder::new("L2")).await.unwrap();
        store
            .update_order(&a.id, &OrderPatch::status("Dispatched"))
            .await
            .unwrap();

        let metrics = MetricsService::new(store).order_metrics().await.unwrap();
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.orders_by_status["Order Received"], 1);
        assert_eq!(metrics.orders_by_status["Dispatched"], 1);
        assert_eq!(metrics.orders_by_status["In Development"], 0);
    }
}
