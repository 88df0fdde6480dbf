use axum::extract::RawQuery;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::catalog::order::parse_entity_order_params;
use crate::catalog::params::QueryParams;

pub fn router() -> Router {
    Router::new().route("/v1/entity-order", get(handle_entity_order))
}

/// Echo the sort directives a catalog list request would use, or `null` when
/// none were given.
async fn handle_entity_order(RawQuery(query): RawQuery) -> impl IntoResponse {
    let params = QueryParams::from_query(query.as_deref().unwrap_or_default());
    match parse_entity_order_params(&params) {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => e.into_response(),
    }
}
