//! In-process store for tests and `--store memory` runs.
//!
//! All collections sit behind one mutex, so each trait method is atomic.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use ulid::Generator;

use super::{CrmStore, StoreError, StoreResult};
use crate::crm::models::{
    DocumentRef, Lead, LeadFilter, NewLead, NewOrder, Order, OrderFilter, OrderPatch, OwnerKind,
};

type DocumentKey = (OwnerKind, String, String);

struct Inner {
    // Monotonic ULIDs keep BTreeMap order equal to insertion order.
    ids: Generator,
    leads: BTreeMap<String, Lead>,
    orders: BTreeMap<String, Order>,
    documents: HashMap<DocumentKey, DocumentRef>,
    fail_order_inserts: bool,
}

impl Inner {
    fn next_id(&mut self) -> StoreResult<String> {
        self.ids
            .generate()
            .map(|id| id.to_string())
            .map_err(|e| StoreError::IdGeneration(e.to_string()))
    }

    fn build_order(&mut self, order: NewOrder) -> StoreResult<Order> {
        if self.fail_order_inserts {
            return Err(StoreError::Rejected("order inserts disabled".to_string()));
        }
        Ok(Order {
            id: self.next_id()?,
            lead_id: order.lead_id,
            status: order.status,
            dispatch_date: order.dispatch_date,
            tracking_info: order.tracking_info,
            documents: order.documents,
            created_at: Utc::now(),
        })
    }

    /// Remove an owner and its document records. Blobs are not touched.
    fn remove_owner(&mut self, kind: OwnerKind, owner_id: &str) -> bool {
        let removed = match kind {
            OwnerKind::Lead => self.leads.remove(owner_id).is_some(),
            OwnerKind::Order => self.orders.remove(owner_id).is_some(),
        };
        if removed {
            self.documents
                .retain(|(k, id, _), _| !(*k == kind && id == owner_id));
        }
        removed
    }

    fn documents_mut(&mut self, kind: OwnerKind, owner_id: &str) -> Option<&mut Vec<String>> {
        match kind {
            OwnerKind::Lead => self.leads.get_mut(owner_id).map(|l| &mut l.documents),
            OwnerKind::Order => self.orders.get_mut(owner_id).map(|o| &mut o.documents),
        }
    }
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                ids: Generator::new(),
                leads: BTreeMap::new(),
                orders: BTreeMap::new(),
                documents: HashMap::new(),
                fail_order_inserts: false,
            }),
        }
    }

    /// Make every order insert fail, including the one inside promotion.
    /// Used to exercise rollback paths.
    pub fn set_fail_order_inserts(&self, fail: bool) {
        self.inner.lock().fail_order_inserts = fail;
    }

    pub fn lead_count(&self) -> usize {
        self.inner.lock().leads.len()
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().orders.len()
    }
}

#[async_trait]
impl CrmStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_lead(&self, lead: NewLead) -> StoreResult<Lead> {
        let mut inner = self.inner.lock();
        let stored = Lead {
            id: inner.next_id()?,
            name: lead.name,
            contact: lead.contact,
            company: lead.company,
            product_interest: lead.product_interest,
            stage: lead.stage,
            follow_up_date: lead.follow_up_date,
            notes: lead.notes,
            documents: lead.documents,
            created_at: Utc::now(),
        };
        inner.leads.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_lead(&self, id: &str) -> StoreResult<Option<Lead>> {
        Ok(self.inner.lock().leads.get(id).cloned())
    }

    async fn list_leads(&self, filter: &LeadFilter) -> StoreResult<Vec<Lead>> {
        let inner = self.inner.lock();
        Ok(inner
            .leads
            .values()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect())
    }

    async fn list_leads_with_followup(&self) -> StoreResult<Vec<Lead>> {
        let inner = self.inner.lock();
        Ok(inner
            .leads
            .values()
            .filter(|lead| lead.follow_up_date.is_some())
            .cloned()
            .collect())
    }

    async fn set_lead_stage(&self, id: &str, stage: &str) -> StoreResult<Option<Lead>> {
        let mut inner = self.inner.lock();
        Ok(inner.leads.get_mut(id).map(|lead| {
            lead.stage = stage.to_string();
            lead.clone()
        }))
    }

    async fn promote_lead(
        &self,
        id: &str,
        stage: &str,
        order: NewOrder,
    ) -> StoreResult<Option<(Lead, Order)>> {
        let mut inner = self.inner.lock();
        let Some(mut lead) = inner.leads.get(id).cloned() else {
            return Ok(None);
        };
        // Build the order first so a failure leaves the lead untouched.
        let order = inner.build_order(order)?;
        lead.stage = stage.to_string();
        inner.leads.insert(lead.id.clone(), lead.clone());
        inner.orders.insert(order.id.clone(), order.clone());
        Ok(Some((lead, order)))
    }

    async fn delete_lead(&self, id: &str) -> StoreResult<bool> {
        Ok(self.inner.lock().remove_owner(OwnerKind::Lead, id))
    }

    async fn count_leads(&self, stage: Option<&str>) -> StoreResult<u64> {
        let inner = self.inner.lock();
        let count = inner
            .leads
            .values()
            .filter(|lead| stage.is_none_or(|s| s == lead.stage))
            .count();
        Ok(count as u64)
    }

    async fn insert_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut inner = self.inner.lock();
        let stored = inner.build_order(order)?;
        inner.orders.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.inner.lock().orders.get(id).cloned())
    }

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let inner = self.inner.lock();
        Ok(inner
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect())
    }

    async fn update_order(&self, id: &str, patch: &OrderPatch) -> StoreResult<Option<Order>> {
        let mut inner = self.inner.lock();
        Ok(inner.orders.get_mut(id).map(|order| {
            patch.apply(order);
            order.clone()
        }))
    }

    async fn delete_order(&self, id: &str) -> StoreResult<bool> {
        Ok(self.inner.lock().remove_owner(OwnerKind::Order, id))
    }

    async fn count_orders(&self, status: Option<&str>) -> StoreResult<u64> {
        let inner = self.inner.lock();
        let count = inner
            .orders
            .values()
            .filter(|order| status.is_none_or(|s| s == order.status))
            .count();
        Ok(count as u64)
    }

    async fn attach_document(&self, doc: &DocumentRef) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        let Some(documents) = inner.documents_mut(doc.owner_kind, &doc.owner_id) else {
            return Ok(false);
        };
        if !documents.contains(&doc.storage_path) {
            documents.push(doc.storage_path.clone());
        }
        inner.documents.insert(
            (
                doc.owner_kind,
                doc.owner_id.clone(),
                doc.storage_path.clone(),
            ),
            doc.clone(),
        );
        Ok(true)
    }

    async fn find_document(
        &self,
        owner_kind: OwnerKind,
        owner_id: &str,
        storage_path: &str,
    ) -> StoreResult<Option<DocumentRef>> {
        let inner = self.inner.lock();
        Ok(inner
            .documents
            .get(&(owner_kind, owner_id.to_string(), storage_path.to_string()))
            .cloned())
    }

    async fn detach_document(
        &self,
        owner_kind: OwnerKind,
        owner_id: &str,
        storage_path: &str,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        inner
            .documents
            .remove(&(owner_kind, owner_id.to_string(), storage_path.to_string()));
        let Some(documents) = inner.documents_mut(owner_kind, owner_id) else {
            return Ok(false);
        };
        match documents.iter().position(|p| p == storage_path) {
            Some(idx) => {
                documents.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
