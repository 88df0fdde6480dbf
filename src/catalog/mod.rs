//! Request parameter handling for catalog list endpoints.

pub mod errors;
pub mod order;
pub mod params;
pub mod web;

pub use errors::InputError;
pub use order::{parse_entity_order_params, EntityOrder, SortDirection};
pub use params::{parse_strings_param, QueryParams};
