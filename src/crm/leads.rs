//! Lead Service - CRUD and stage transitions for leads
//!
//! Moving a lead to `Won` promotes it: the stage write and the new
//! `Order Received` order are committed together by the store.

use std::sync::Arc;

use super::error::{CrmError, CrmResult};
use super::models::{Lead, LeadFilter, LeadStage, NewLead, NewOrder, Order};
use super::store::CrmStore;

const LEAD_NOT_FOUND: &str = "Lead not found";

/// Result of a stage update
#[derive(Debug, Clone, PartialEq)]
pub struct StageChange {
    /// The lead as stored after the write
    pub lead: Lead,
    /// Order created by promotion, if the new stage was `Won`
    pub promoted_order: Option<Order>,
}

#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn CrmStore>,
}

impl LeadService {
    pub fn new(store: Arc<dyn CrmStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, lead: NewLead) -> CrmResult<Lead> {
        let lead = self.store.insert_lead(lead).await?;
        tracing::info!(lead_id = %lead.id, stage = %lead.stage, "lead created");
        Ok(lead)
    }

    pub async fn get(&self, id: &str) -> CrmResult<Lead> {
        self.store
            .get_lead(id)
            .await?
            .ok_or_else(|| CrmError::not_found(LEAD_NOT_FOUND))
    }

    pub async fn list(&self, filter: &LeadFilter) -> CrmResult<Vec<Lead>> {
        Ok(self.store.list_leads(filter).await?)
    }

    /// Every lead with a follow-up date set; no date comparison.
    pub async fn list_with_followup(&self) -> CrmResult<Vec<Lead>> {
        Ok(self.store.list_leads_with_followup().await?)
    }

    pub async fn update_stage(&self, id: &str, stage: &str) -> CrmResult<StageChange> {
        if LeadStage::Won.matches(stage) {
            let (lead, order) = self
                .store
                .promote_lead(id, stage, NewOrder::new(id))
                .await
                .inspect_err(|e| tracing::error!(lead_id = id, "lead promotion failed: {}", e))?
                .ok_or_else(|| CrmError::not_found(LEAD_NOT_FOUND))?;
            tracing::info!(
                lead_id = id,
                order_id = %order.id,
                "lead won, order created"
            );
            return Ok(StageChange {
                lead,
                promoted_order: Some(order),
            });
        }

        let lead = self
            .store
            .set_lead_stage(id, stage)
            .await?
            .ok_or_else(|| CrmError::not_found(LEAD_NOT_FOUND))?;
        tracing::info!(lead_id = id, stage, "lead stage updated");
        Ok(StageChange {
            lead,
            promoted_order: None,
        })
    }

    /// Remove the lead. Attached blobs are left in storage.
    pub async fn delete(&self, id: &str) -> CrmResult<()> {
        if !self.store.delete_lead(id).await? {
            return Err(CrmError::not_found(LEAD_NOT_FOUND));
        }
        tracing::info!(lead_id = id, "lead deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::error::ErrorKind;
    use crate::crm::models::{OrderFilter, OrderStatus};
    use crate::crm::store::MemoryStore;

    fn service() -> (LeadService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (LeadService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_defaults_stage_and_assigns_id() {
        let (svc, _) = service();
        let a = svc.create(NewLead::new("A", "x")).await.unwrap();
        let b = svc.create(NewLead::new("B", "y")).await.unwrap();
        assert_eq!(a.stage, "New");
        assert!(a.documents.is_empty());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_won_creates_exactly_one_order() {
        let (svc, store) = service();
        let lead = svc.create(NewLead::new("A", "x")).await.unwrap();

        let change = svc.update_stage(&lead.id, "Won").await.unwrap();
        assert_eq!(change.lead.stage, "Won");
        let order = change.promoted_order.unwrap();
        assert_eq!(order.lead_id, lead.id);
        assert_eq!(order.status, OrderStatus::OrderReceived.as_str());

        let orders = store
            .list_orders(&OrderFilter {
                lead_id: Some(lead.id.clone()),
            })
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn test_other_stages_create_no_order() {
        let (svc, store) = service();
        let lead = svc.create(NewLead::new("A", "x")).await.unwrap();
        for stage in ["Contacted", "Qualified", "Proposal Sent", "Lost", "won", "Archived"] {
            let change = svc.update_stage(&lead.id, stage).await.unwrap();
            assert_eq!(change.lead.stage, stage);
            assert!(change.promoted_order.is_none());
        }
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_stage_update_returns_stored_record() {
        let (svc, _) = service();
        let lead = svc.create(NewLead::new("A", "x")).await.unwrap();
        let change = svc.update_stage(&lead.id, "Qualified").await.unwrap();
        assert_eq!(change.lead, svc.get(&lead.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_promotion_surfaces_and_keeps_stage() {
        let (svc, store) = service();
        let lead = svc.create(NewLead::new("A", "x")).await.unwrap();
        store.set_fail_order_inserts(true);

        let err = svc.update_stage(&lead.id, "Won").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(svc.get(&lead.id).await.unwrap().stage, "New");
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_lead_is_not_found() {
        let (svc, store) = service();
        for err in [
            svc.update_stage("missing", "Won").await.unwrap_err(),
            svc.update_stage("missing", "Lost").await.unwrap_err(),
            svc.delete("missing").await.unwrap_err(),
            svc.get("missing").await.unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert_eq!(err.to_string(), "Lead not found");
        }
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let (svc, _) = service();
        let keep = svc.create(NewLead::new("keep", "x")).await.unwrap();
        let gone = svc.create(NewLead::new("gone", "y")).await.unwrap();

        svc.delete(&gone.id).await.unwrap();
        let ids: Vec<_> = svc
            .list(&LeadFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[tokio::test]
    async fn test_list_filters_and_followup() {
        let (svc, _) = service();
        let mut with_date = NewLead::new("A", "x");
        with_date.follow_up_date = Some("2026-11-01".into());
        let a = svc.create(with_date).await.unwrap();
        let b = svc.create(NewLead::new("B", "y")).await.unwrap();
        svc.update_stage(&b.id, "Contacted").await.unwrap();

        let contacted = svc
            .list(&LeadFilter {
                stage: Some("Contacted".into()),
                ..LeadFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].id, b.id);

        let by_date = svc
            .list(&LeadFilter {
                follow_up_date: Some("2026-11-01".into()),
                ..LeadFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id, a.id);

        let followups = svc.list_with_followup().await.unwrap();
        assert_eq!(followups.len(), 1);
        assert_eq!(followups[0].id, a.id);
    }
}
