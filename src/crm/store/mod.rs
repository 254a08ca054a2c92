//! Document store gateway
//!
//! The services talk to the `leads` and `orders` collections through
//! [`CrmStore`]. Every method is a single atomic unit against the backend:
//! promotion writes the stage and inserts the order together, and
//! attach/detach edit a document list without a read-modify-write.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{
    DocumentRef, Lead, LeadFilter, NewLead, NewOrder, Order, OrderFilter, OrderPatch, OwnerKind,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Id generation failed: {0}")]
    IdGeneration(String),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CrmStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Cheap liveness probe
    async fn ping(&self) -> StoreResult<()>;

    // --- leads ---

    async fn insert_lead(&self, lead: NewLead) -> StoreResult<Lead>;

    async fn get_lead(&self, id: &str) -> StoreResult<Option<Lead>>;

    async fn list_leads(&self, filter: &LeadFilter) -> StoreResult<Vec<Lead>>;

    /// Leads whose follow-up date is set
    async fn list_leads_with_followup(&self) -> StoreResult<Vec<Lead>>;

    /// Set the stage and return the stored record, `None` if absent.
    async fn set_lead_stage(&self, id: &str, stage: &str) -> StoreResult<Option<Lead>>;

    /// Set the stage and insert `order` in one transaction.
    ///
    /// Returns `None` (and writes nothing) if the lead is absent. On error
    /// neither write is committed.
    async fn promote_lead(
        &self,
        id: &str,
        stage: &str,
        order: NewOrder,
    ) -> StoreResult<Option<(Lead, Order)>>;

    /// Returns false if the lead did not exist.
    async fn delete_lead(&self, id: &str) -> StoreResult<bool>;

    /// Count leads, optionally restricted to one stage
    async fn count_leads(&self, stage: Option<&str>) -> StoreResult<u64>;

    // --- orders ---

    async fn insert_order(&self, order: NewOrder) -> StoreResult<Order>;

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>>;

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>>;

    /// Apply the present fields of `patch`, return the stored record.
    async fn update_order(&self, id: &str, patch: &OrderPatch) -> StoreResult<Option<Order>>;

    async fn delete_order(&self, id: &str) -> StoreResult<bool>;

    async fn count_orders(&self, status: Option<&str>) -> StoreResult<u64>;

    // --- documents ---

    /// Append `doc.storage_path` to the owner's list unless already present
    /// and record `doc`. Returns false if the owner does not exist.
    async fn attach_document(&self, doc: &DocumentRef) -> StoreResult<bool>;

    async fn find_document(
        &self,
        owner_kind: OwnerKind,
        owner_id: &str,
        storage_path: &str,
    ) -> StoreResult<Option<DocumentRef>>;

    /// Remove one occurrence of `storage_path` from the owner's list and
    /// drop its record. Returns whether the path was in the list.
    async fn detach_document(
        &self,
        owner_kind: OwnerKind,
        owner_id: &str,
        storage_path: &str,
    ) -> StoreResult<bool>;
}
