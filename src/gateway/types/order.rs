//! Order request DTOs

use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

use crate::crm::{NewOrder, OrderFilter, OrderPatch, OrderStatus};

fn default_status() -> String {
    OrderStatus::OrderReceived.as_str().to_string()
}

/// Distinguishes an explicit `null` (Some(None)) from a missing field (None).
fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

/// Create order request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderCreate {
    #[schema(example = "01JA8Z7B0C1D2E3F4G5H6J7K8M")]
    pub lead_id: String,
    /// Defaults to `Order Received`
    #[serde(default = "default_status")]
    #[schema(example = "Order Received")]
    pub status: String,
    #[serde(default)]
    pub dispatch_date: Option<String>,
    #[serde(default)]
    pub tracking_info: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl From<OrderCreate> for NewOrder {
    fn from(req: OrderCreate) -> Self {
        Self {
            lead_id: req.lead_id,
            status: req.status,
            dispatch_date: req.dispatch_date,
            tracking_info: req.tracking_info,
            documents: req.documents,
        }
    }
}

/// Partial order update; only fields present in the body are written.
/// `null` clears `dispatch_date` / `tracking_info`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderUpdate {
    #[serde(default)]
    pub lead_id: Option<String>,
    #[serde(default)]
    #[schema(example = "In Development")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub dispatch_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub tracking_info: Option<Option<String>>,
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

impl From<OrderUpdate> for OrderPatch {
    fn from(req: OrderUpdate) -> Self {
        Self {
            lead_id: req.lead_id,
            status: req.status,
            dispatch_date: req.dispatch_date,
            tracking_info: req.tracking_info,
            documents: req.documents,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusUpdate {
    #[schema(example = "Dispatched")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    /// Only orders promoted from this lead
    pub lead_id: Option<String>,
}

impl From<OrderQuery> for OrderFilter {
    fn from(q: OrderQuery) -> Self {
        Self {
            lead_id: q.lead_id.filter(|id| !id.is_empty()),
        }
    }
}
