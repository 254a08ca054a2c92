//! Lead, order and document-reference records
//!
//! Stage and status are stored as free strings. [`LeadStage`] and
//! [`OrderStatus`] name the known values, which drive defaults, the
//! promotion rule and the metrics buckets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================================
// Known stages / statuses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadStage {
    New,
    Contacted,
    Qualified,
    ProposalSent,
    Won,
    Lost,
}

impl LeadStage {
    pub const ALL: [LeadStage; 6] = [
        LeadStage::New,
        LeadStage::Contacted,
        LeadStage::Qualified,
        LeadStage::ProposalSent,
        LeadStage::Won,
        LeadStage::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStage::New => "New",
            LeadStage::Contacted => "Contacted",
            LeadStage::Qualified => "Qualified",
            LeadStage::ProposalSent => "Proposal Sent",
            LeadStage::Won => "Won",
            LeadStage::Lost => "Lost",
        }
    }

    /// Exact, case-sensitive match against the stored string.
    pub fn matches(self, stage: &str) -> bool {
        self.as_str() == stage
    }
}

impl fmt::Display for LeadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    OrderReceived,
    InDevelopment,
    ReadyToDispatch,
    Dispatched,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::OrderReceived,
        OrderStatus::InDevelopment,
        OrderStatus::ReadyToDispatch,
        OrderStatus::Dispatched,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::OrderReceived => "Order Received",
            OrderStatus::InDevelopment => "In Development",
            OrderStatus::ReadyToDispatch => "Ready to Dispatch",
            OrderStatus::Dispatched => "Dispatched",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// Stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Lead {
    /// Store-assigned identifier
    #[schema(example = "01JA8Z6Q4T5Y2M3N7P9R1S0V2W")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub contact: String,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    #[schema(example = "New")]
    pub stage: String,
    #[schema(example = "2026-11-02")]
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
    /// Storage paths of attached documents, in attach order
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Lead fields accepted on creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub contact: String,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub stage: String,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
    pub documents: Vec<String>,
}

impl NewLead {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            company: None,
            product_interest: None,
            stage: LeadStage::New.as_str().to_string(),
            follow_up_date: None,
            notes: None,
            documents: Vec::new(),
        }
    }
}

/// Stored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Order {
    #[schema(example = "01JA8Z7B0C1D2E3F4G5H6J7K8M")]
    pub id: String,
    /// Owning lead (not checked for existence)
    #[schema(example = "01JA8Z6Q4T5Y2M3N7P9R1S0V2W")]
    pub lead_id: String,
    #[schema(example = "Order Received")]
    pub status: String,
    pub dispatch_date: Option<String>,
    pub tracking_info: Option<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Order fields accepted on creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub lead_id: String,
    pub status: String,
    pub dispatch_date: Option<String>,
    pub tracking_info: Option<String>,
    pub documents: Vec<String>,
}

impl NewOrder {
    pub fn new(lead_id: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            status: OrderStatus::OrderReceived.as_str().to_string(),
            dispatch_date: None,
            tracking_info: None,
            documents: Vec::new(),
        }
    }
}

/// Partial order update. `None` leaves a field untouched; for the nullable
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub lead_id: Option<String>,
    pub status: Option<String>,
    pub dispatch_date: Option<Option<String>>,
    pub tracking_info: Option<Option<String>>,
    pub documents: Option<Vec<String>>,
}

impl OrderPatch {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lead_id.is_none()
            && self.status.is_none()
            && self.dispatch_date.is_none()
            && self.tracking_info.is_none()
            && self.documents.is_none()
    }

    pub fn apply(&self, order: &mut Order) {
        if let Some(lead_id) = &self.lead_id {
            order.lead_id = lead_id.clone();
        }
        if let Some(status) = &self.status {
            order.status = status.clone();
        }
        if let Some(dispatch_date) = &self.dispatch_date {
            order.dispatch_date = dispatch_date.clone();
        }
        if let Some(tracking_info) = &self.tracking_info {
            order.tracking_info = tracking_info.clone();
        }
        if let Some(documents) = &self.documents {
            order.documents = documents.clone();
        }
    }
}

/// Equality filters for listing leads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    pub stage: Option<String>,
    pub follow_up_date: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.stage.as_ref().is_none_or(|s| *s == lead.stage)
            && self
                .follow_up_date
                .as_ref()
                .is_none_or(|d| lead.follow_up_date.as_ref() == Some(d))
    }
}

/// Equality filters for listing orders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub lead_id: Option<String>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.lead_id.as_ref().is_none_or(|id| *id == order.lead_id)
    }
}

// ============================================================================
// Document references
// ============================================================================

/// Kind of record a document is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Lead,
    Order,
}

impl OwnerKind {
    /// Wire name (`document_type` form field)
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::Lead => "lead",
            OwnerKind::Order => "order",
        }
    }

    /// Collection name, also the first blob key segment
    pub fn collection(self) -> &'static str {
        match self {
            OwnerKind::Lead => "leads",
            OwnerKind::Order => "orders",
        }
    }

    /// Capitalized name used in messages
    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::Lead => "Lead",
            OwnerKind::Order => "Order",
        }
    }
}

impl FromStr for OwnerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" => Ok(OwnerKind::Lead),
            "order" => Ok(OwnerKind::Order),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a storage path could not be resolved to a blob key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentPathError {
    #[error("path is not inside bucket '{0}'")]
    ForeignBucket(String),
    #[error("path must have the form {{type}}s/{{id}}/{{filename}}")]
    Malformed,
    #[error("path does not belong to {kind} {id}")]
    WrongOwner { kind: OwnerKind, id: String },
}

/// Structured record of an attached document.
///
/// `storage_path` is the string kept in the owner's `documents` list;
/// the other fields let deletion address the blob without re-parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub owner_kind: OwnerKind,
    pub owner_id: String,
    pub filename: String,
    pub storage_path: String,
    pub content_type: Option<String>,
}

impl DocumentRef {
    pub fn new(
        bucket: &str,
        owner_kind: OwnerKind,
        owner_id: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<String>,
    ) -> Self {
        let owner_id = owner_id.into();
        let filename = filename.into();
        let storage_path = format!(
            "gs://{}/{}/{}/{}",
            bucket,
            owner_kind.collection(),
            owner_id,
            filename
        );
        Self {
            owner_kind,
            owner_id,
            filename,
            storage_path,
            content_type,
        }
    }

    /// Object key inside the bucket: `{type}s/{id}/{filename}`
    pub fn blob_key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.owner_kind.collection(),
            self.owner_id,
            self.filename
        )
    }

    /// Strictly parse a `gs://{bucket}/{type}s/{id}/{filename}` path that
    /// must belong to the given owner.
    pub fn parse(
        bucket: &str,
        owner_kind: OwnerKind,
        owner_id: &str,
        storage_path: &str,
    ) -> Result<Self, DocumentPathError> {
        let prefix = format!("gs://{}/", bucket);
        let key = storage_path
            .strip_prefix(&prefix)
            .ok_or_else(|| DocumentPathError::ForeignBucket(bucket.to_string()))?;

        let segments: Vec<&str> = key.split('/').collect();
        let [collection, id, filename] = segments.as_slice() else {
            return Err(DocumentPathError::Malformed);
        };
        if collection.is_empty() || id.is_empty() || filename.is_empty() {
            return Err(DocumentPathError::Malformed);
        }
        if *collection != owner_kind.collection() || *id != owner_id {
            return Err(DocumentPathError::WrongOwner {
                kind: owner_kind,
                id: owner_id.to_string(),
            });
        }

        Ok(Self {
            owner_kind,
            owner_id: owner_id.to_string(),
            filename: filename.to_string(),
            storage_path: storage_path.to_string(),
            content_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKET: &str = "crm-docs";

    #[test]
    fn test_known_stage_strings() {
        let names: Vec<&str> = LeadStage::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["New", "Contacted", "Qualified", "Proposal Sent", "Won", "Lost"]
        );
        assert!(LeadStage::Won.matches("Won"));
        assert!(!LeadStage::Won.matches("won"));
    }

    #[test]
    fn test_known_status_strings() {
        let names: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            [
                "Order Received",
                "In Development",
                "Ready to Dispatch",
                "Dispatched"
            ]
        );
    }

    #[test]
    fn test_new_records_use_default_stage_and_status() {
        assert_eq!(NewLead::new("A", "x").stage, "New");
        assert_eq!(NewOrder::new("lead-1").status, "Order Received");
    }

    #[test]
    fn test_owner_kind_from_str() {
        assert_eq!("lead".parse::<OwnerKind>(), Ok(OwnerKind::Lead));
        assert_eq!("order".parse::<OwnerKind>(), Ok(OwnerKind::Order));
        assert!("Lead".parse::<OwnerKind>().is_err());
        assert!("invoice".parse::<OwnerKind>().is_err());
    }

    #[test]
    fn test_document_ref_paths() {
        let doc = DocumentRef::new(BUCKET, OwnerKind::Lead, "L1", "quote.pdf", None);
        assert_eq!(doc.storage_path, "gs://crm-docs/leads/L1/quote.pdf");
        assert_eq!(doc.blob_key(), "leads/L1/quote.pdf");
    }

    #[test]
    fn test_parse_accepts_own_path() {
        let doc = DocumentRef::parse(
            BUCKET,
            OwnerKind::Order,
            "O7",
            "gs://crm-docs/orders/O7/invoice.pdf",
        )
        .unwrap();
        assert_eq!(doc.filename, "invoice.pdf");
        assert_eq!(doc.blob_key(), "orders/O7/invoice.pdf");
    }

    #[test]
    fn test_parse_rejects_other_bucket() {
        let err = DocumentRef::parse(BUCKET, OwnerKind::Lead, "L1", "gs://other/leads/L1/a.pdf")
            .unwrap_err();
        assert_eq!(err, DocumentPathError::ForeignBucket(BUCKET.to_string()));
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        for path in [
            "gs://crm-docs/leads/L1",
            "gs://crm-docs/leads/L1/nested/a.pdf",
            "gs://crm-docs/leads//a.pdf",
            "gs://crm-docs/",
        ] {
            assert_eq!(
                DocumentRef::parse(BUCKET, OwnerKind::Lead, "L1", path),
                Err(DocumentPathError::Malformed),
                "{path}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_other_owner() {
        let err = DocumentRef::parse(BUCKET, OwnerKind::Lead, "L1", "gs://crm-docs/orders/L1/a.pdf")
            .unwrap_err();
        assert!(matches!(err, DocumentPathError::WrongOwner { .. }));

        let err = DocumentRef::parse(BUCKET, OwnerKind::Lead, "L1", "gs://crm-docs/leads/L2/a.pdf")
            .unwrap_err();
        assert!(matches!(err, DocumentPathError::WrongOwner { .. }));
    }

    #[test]
    fn test_order_patch_leaves_absent_fields() {
        let mut order = Order {
            id: "O1".into(),
            lead_id: "L1".into(),
            status: "Order Received".into(),
            dispatch_date: Some("2026-10-30".into()),
            tracking_info: Some("TRK-1".into()),
            documents: vec!["gs://b/orders/O1/a.pdf".into()],
            created_at: Utc::now(),
        };
        OrderPatch::status("Dispatched").apply(&mut order);
        assert_eq!(order.status, "Dispatched");
        assert_eq!(order.tracking_info.as_deref(), Some("TRK-1"));
        assert_eq!(order.documents.len(), 1);

        let clear = OrderPatch {
            tracking_info: Some(None),
            ..OrderPatch::default()
        };
        clear.apply(&mut order);
        assert_eq!(order.tracking_info, None);
        assert_eq!(order.dispatch_date.as_deref(), Some("2026-10-30"));
    }

    #[test]
    fn test_lead_filter_matches_exactly() {
        let lead = Lead {
            id: "L1".into(),
            name: "A".into(),
            contact: "x".into(),
            company: None,
            product_interest: None,
            stage: "Qualified".into(),
            follow_up_date: Some("2026-11-01".into()),
            notes: None,
            documents: vec![],
            created_at: Utc::now(),
        };
        assert!(LeadFilter::default().matches(&lead));
        let by_stage = LeadFilter {
            stage: Some("Qualified".into()),
            ..LeadFilter::default()
        };
        assert!(by_stage.matches(&lead));
        let by_date = LeadFilter {
            follow_up_date: Some("2026-11".into()),
            ..LeadFilter::default()
        };
        assert!(!by_date.matches(&lead));
    }
}
