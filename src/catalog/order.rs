use serde::{Deserialize, Serialize};

use crate::catalog::errors::InputError;
use crate::catalog::params::{parse_strings_param, QueryParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A single sort directive: order results by `field` in `order` direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityOrder {
    pub field: String,
    pub order: SortDirection,
}

impl EntityOrder {
    /// Parse one raw order item such as `+metadata.name`, `-kind` or `spec.type`.
    pub fn parse(item: &str) -> Result<Self, InputError> {
        let trimmed = item.trim_start();
        let (order, rest) = match trimmed.chars().next() {
            Some('+') => (SortDirection::Asc, &trimmed[1..]),
            Some('-') => (SortDirection::Desc, &trimmed[1..]),
            _ => (SortDirection::Asc, trimmed),
        };

        let field = rest.trim();
        if field.is_empty() {
            return Err(InputError::EmptyOrderField {
                item: item.to_string(),
            });
        }

        Ok(Self {
            field: field.to_string(),
            order,
        })
    }
}

/// Extract the sort directives from the `order` request parameter.
///
/// Returns `Ok(None)` when no ordering was requested at all, which is distinct
/// from an explicitly empty list.
pub fn parse_entity_order_params(
    params: &QueryParams,
) -> Result<Option<Vec<EntityOrder>>, InputError> {
    let Some(items) = parse_strings_param(params.get("order"), "order")? else {
        return Ok(None);
    };

    let orders = items
        .iter()
        .map(|item| EntityOrder::parse(item))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = orders.len(), "Parsed order parameters");
    Ok(Some(orders))
}
