//! Order Service - CRUD, partial updates and status changes for orders

use std::sync::Arc;

use super::error::{CrmError, CrmResult};
use super::models::{NewOrder, Order, OrderFilter, OrderPatch};
use super::store::CrmStore;

const ORDER_NOT_FOUND: &str = "Order not found";

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn CrmStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn CrmStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, order: NewOrder) -> CrmResult<Order> {
        let order = self.store.insert_order(order).await?;
        tracing::info!(order_id = %order.id, lead_id = %order.lead_id, "order created");
        Ok(order)
    }

    pub async fn get(&self, id: &str) -> CrmResult<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| CrmError::not_found(ORDER_NOT_FOUND))
    }

    pub async fn list(&self, filter: &OrderFilter) -> CrmResult<Vec<Order>> {
        Ok(self.store.list_orders(filter).await?)
    }

    /// Apply only the fields present in `patch`; returns the stored record.
    pub async fn update(&self, id: &str, patch: &OrderPatch) -> CrmResult<Order> {
        let order = self
            .store
            .update_order(id, patch)
            .await?
            .ok_or_else(|| CrmError::not_found(ORDER_NOT_FOUND))?;
        tracing::info!(order_id = id, "order updated");
        Ok(order)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> CrmResult<Order> {
        let order = self
            .store
            .update_order(id, &OrderPatch::status(status))
            .await?
            .ok_or_else(|| CrmError::not_found(ORDER_NOT_FOUND))?;
        tracing::info!(order_id = id, status, "order status updated");
        Ok(order)
    }

    pub async fn delete(&self, id: &str) -> CrmResult<()> {
        if !self.store.delete_order(id).await? {
            return Err(CrmError::not_found(ORDER_NOT_FOUND));
        }
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::error::ErrorKind;
    use crate::crm::store::MemoryStore;

    fn service() -> OrderService {
        OrderService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_defaults_status() {
        let svc = service();
        let order = svc.create(NewOrder::new("L1")).await.unwrap();
        assert_eq!(order.status, "Order Received");
        assert_eq!(order.lead_id, "L1");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_tracking_info() {
        let svc = service();
        let mut new = NewOrder::new("L1");
        new.tracking_info = Some("TRK-42".into());
        new.dispatch_date = Some("2026-10-25".into());
        let order = svc.create(new).await.unwrap();

        let updated = svc
            .update(&order.id, &OrderPatch::status("In Development"))
            .await
            .unwrap();
        assert_eq!(updated.status, "In Development");
        assert_eq!(updated.tracking_info.as_deref(), Some("TRK-42"));
        assert_eq!(updated.dispatch_date.as_deref(), Some("2026-10-25"));
        assert_eq!(updated, svc.get(&order.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_patch_returns_current_record() {
        let svc = service();
        let order = svc.create(NewOrder::new("L1")).await.unwrap();
        let same = svc.update(&order.id, &OrderPatch::default()).await.unwrap();
        assert_eq!(same, order);
    }

    #[tokio::test]
    async fn test_update_status_returns_stored_record() {
        let svc = service();
        let order = svc.create(NewOrder::new("L1")).await.unwrap();
        let updated = svc.update_status(&order.id, "Dispatched").await.unwrap();
        assert_eq!(updated.status, "Dispatched");
        assert_eq!(updated, svc.get(&order.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let svc = service();
        for err in [
            svc.update("nope", &OrderPatch::status("Dispatched"))
                .await
                .unwrap_err(),
            svc.update_status("nope", "Dispatched").await.unwrap_err(),
            svc.delete("nope").await.unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert_eq!(err.to_string(), "Order not found");
        }
    }

    #[tokio::test]
    async fn test_list_by_lead_and_delete() {
        let svc = service();
        let a = svc.create(NewOrder::new("L1")).await.unwrap();
        svc.create(NewOrder::new("L2")).await.unwrap();

        let for_l1 = svc
            .list(&OrderFilter {
                lead_id: Some("L1".into()),
            })
            .await
            .unwrap();
        assert_eq!(for_l1.len(), 1);

        svc.delete(&a.id).await.unwrap();
        assert_eq!(svc.list(&OrderFilter::default()).await.unwrap().len(), 1);
    }
}
