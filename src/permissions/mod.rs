//! Forwarding of conditional authorization decisions to the plugins that own
//! the affected resources.

pub mod client;
pub mod errors;
pub mod types;
pub mod web;

pub use client::{PermissionIntegrationClient, APPLY_CONDITIONS_PATH};
pub use errors::IntegrationError;
pub use types::{
    ApplyConditionsRequest, ApplyConditionsResponse, AuthorizeResult, ConditionsToApply,
    PermissionCondition, PermissionCriteria,
};
