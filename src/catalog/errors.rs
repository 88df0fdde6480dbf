use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid order parameter \"{item}\", no field given")]
    #[diagnostic(
        code(permbridge::catalog::empty_order_field),
        help("Order items look like `field`, `+field` (ascending) or `-field` (descending)")
    )]
    EmptyOrderField { item: String },

    #[error("Invalid {ctx}, not a string")]
    #[diagnostic(
        code(permbridge::catalog::not_a_string),
        help("Repeat the query parameter once per value, e.g. ?order=-kind&order=metadata.name")
    )]
    NotAString { ctx: String },
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
