use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

use crate::discovery::DiscoveryError;

#[derive(Debug, Error, Diagnostic)]
pub enum IntegrationError {
    #[error("Failed to discover plugin endpoint")]
    #[diagnostic(
        code(permbridge::permissions::discovery),
        help("Check the `discovery.endpoints` settings for the target plugin")
    )]
    Discovery(#[from] DiscoveryError),

    #[error("Request to `{url}` could not be completed")]
    #[diagnostic(code(permbridge::permissions::transport))]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed with {status} {status_text}")]
    #[diagnostic(
        code(permbridge::permissions::upstream),
        help("The plugin rejected the apply-conditions request; its response body is attached")
    )]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Invalid input in apply-conditions response: {0}")]
    #[diagnostic(
        code(permbridge::permissions::invalid_response),
        help("Expected a JSON body of the form {{\"result\": \"ALLOW\"}} or {{\"result\": \"DENY\"}}")
    )]
    InvalidResponse(#[source] serde_json::Error),

    #[error("Authorization header must be visible ASCII")]
    #[diagnostic(
        code(permbridge::permissions::invalid_credential),
        help("Send the credential as e.g. `authorization: Bearer <token>`")
    )]
    InvalidCredential,
}

impl IntegrationError {
    /// Upstream status code, when the plugin answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            IntegrationError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl IntoResponse for IntegrationError {
    fn into_response(self) -> Response {
        let status = match &self {
            IntegrationError::InvalidCredential => StatusCode::BAD_REQUEST,
            IntegrationError::Discovery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            IntegrationError::Transport { .. }
            | IntegrationError::Upstream { .. }
            | IntegrationError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        };
        let mut body = json!({ "error": self.to_string() });
        if let IntegrationError::Upstream {
            status: upstream, ..
        } = &self
        {
            body["upstreamStatus"] = json!(upstream);
        }
        (status, Json(body)).into_response()
    }
}
