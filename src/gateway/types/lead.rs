//! Lead request DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::crm::{LeadFilter, LeadStage, NewLead};

fn default_stage() -> String {
    LeadStage::New.as_str().to_string()
}

/// Create lead request
///
/// Any `id` in the body is ignored; the store assigns one.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeadCreate {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub contact: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub product_interest: Option<String>,
    /// Defaults to `New`
    #[serde(default = "default_stage")]
    #[schema(example = "New")]
    pub stage: String,
    #[serde(default)]
    #[schema(example = "2026-11-01")]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl From<LeadCreate> for NewLead {
    fn from(req: LeadCreate) -> Self {
        Self {
            name: req.name,
            contact: req.contact,
            company: req.company,
            product_interest: req.product_interest,
            stage: req.stage,
            follow_up_date: req.follow_up_date,
            notes: req.notes,
            documents: req.documents,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StageUpdate {
    #[schema(example = "Won")]
    pub stage: String,
}

/// Lead list filters; empty values are treated as absent
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadQuery {
    /// Exact stage match
    pub stage: Option<String>,
    /// Exact follow-up date match
    pub follow_up_date: Option<String>,
}

impl From<LeadQuery> for LeadFilter {
    fn from(q: LeadQuery) -> Self {
        Self {
            stage: q.stage.filter(|s| !s.is_empty()),
            follow_up_date: q.follow_up_date.filter(|d| !d.is_empty()),
        }
    }
}
