//! permbridge - backend-plugin glue for the developer portal
//!
//! Parses catalog `order` request parameters into sort directives and forwards
//! conditional permission decisions to the plugins that own the resources.

pub mod catalog;
pub mod discovery;
pub mod errors;
pub mod permissions;
pub mod settings;
pub mod web;
