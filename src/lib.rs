//! Leadflow - CRM backend for a sales pipeline
//!
//! Leads move through stages; a lead marked `Won` is promoted into an order.
//! Both carry lists of attached documents kept in blob storage.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing setup with rolling log files
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`crm`] - records, stores and the lead/order/attachment/metrics services
//! - [`blob`] - blob storage backends
//! - [`gateway`] - axum HTTP surface and OpenAPI docs

pub mod blob;
pub mod config;
pub mod crm;
pub mod db;
pub mod gateway;
pub mod logging;

pub use config::AppConfig;
pub use crm::{CrmError, CrmResult, Lead, Order};
