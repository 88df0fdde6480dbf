//! HTTP surface: the apply-conditions relay, the entity-order endpoint and a
//! health probe, assembled into one router.
use crate::catalog;
use crate::discovery::HostDiscovery;
use crate::permissions;
use crate::permissions::PermissionIntegrationClient;
use crate::settings::Settings;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use miette::IntoDiagnostic;
use std::sync::Arc;
use std::time::Instant;

pub fn app(client: PermissionIntegrationClient) -> Router {
    Router::new()
        .merge(permissions::web::router(client))
        .merge(catalog::web::router())
        .route("/healthz", get(health))
        .layer(middleware::from_fn(log_requests))
}

pub async fn serve(settings: Settings) -> miette::Result<()> {
    let discovery = Arc::new(HostDiscovery::from_settings(&settings));
    let client = PermissionIntegrationClient::new(discovery);
    let router = app(client);

    let listener =
        tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port))
            .await
            .into_diagnostic()?;
    let addr = listener.local_addr().into_diagnostic()?;
    tracing::info!(%addr, "Permission relay listening");

    axum::serve(listener, router).await.into_diagnostic()?;
    Ok(())
}

async fn log_requests(request: Request<Body>, next: Next) -> impl IntoResponse {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
