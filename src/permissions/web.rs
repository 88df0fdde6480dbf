use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::permissions::client::PermissionIntegrationClient;
use crate::permissions::errors::IntegrationError;
use crate::permissions::types::RelayRequest;

pub fn router(client: PermissionIntegrationClient) -> Router {
    Router::new()
        .route("/v1/apply-conditions", post(handle_apply_conditions))
        .with_state(client)
}

async fn handle_apply_conditions(
    State(client): State<PermissionIntegrationClient>,
    headers: HeaderMap,
    Json(req): Json<RelayRequest>,
) -> impl IntoResponse {
    let authorization = match headers.get(AUTHORIZATION).map(|value| value.to_str()) {
        None => None,
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => return IntegrationError::InvalidCredential.into_response(),
    };
    let (resource_ref, conditions) = req.into_parts();

    match client
        .apply_conditions(&resource_ref, &conditions, authorization)
        .await
    {
        Ok(decision) => Json(decision).into_response(),
        Err(e) => e.into_response(),
    }
}
