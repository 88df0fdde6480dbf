use std::sync::Arc;

use reqwest::header::AUTHORIZATION;

use crate::discovery::PluginEndpointDiscovery;
use crate::permissions::errors::IntegrationError;
use crate::permissions::types::{
    ApplyConditionsRequest, ApplyConditionsResponse, ConditionsToApply,
};

pub const APPLY_CONDITIONS_PATH: &str = "/permissions/apply-conditions";

/// Sends conditional decisions to the plugin that owns the resource type and
/// returns its definitive answer.
///
/// Each call is a single request: no retries, timeouts or caching.
#[derive(Clone)]
pub struct PermissionIntegrationClient {
    discovery: Arc<dyn PluginEndpointDiscovery>,
    http: reqwest::Client,
}

impl PermissionIntegrationClient {
    pub fn new(discovery: Arc<dyn PluginEndpointDiscovery>) -> Self {
        Self {
            discovery,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Ask the owning plugin whether `resource_ref` satisfies `conditions`.
    ///
    /// `authorization` is forwarded verbatim as the `authorization` header,
    /// e.g. `Bearer <token>`; it is omitted when `None` or empty.
    pub async fn apply_conditions(
        &self,
        resource_ref: &str,
        conditions: &ConditionsToApply,
        authorization: Option<&str>,
    ) -> Result<ApplyConditionsResponse, IntegrationError> {
        let base_url = self.discovery.get_base_url(&conditions.plugin_id).await?;
        let endpoint = format!("{base_url}{APPLY_CONDITIONS_PATH}");

        let request = ApplyConditionsRequest {
            resource_ref: resource_ref.to_string(),
            resource_type: conditions.resource_type.clone(),
            conditions: conditions.conditions.clone(),
        };

        // .json() also sets content-type: application/json
        let mut builder = self.http.post(&endpoint).json(&request);
        if let Some(credential) = authorization.filter(|c| !c.is_empty()) {
            builder = builder.header(AUTHORIZATION, credential);
        }

        let transport = |source| IntegrationError::Transport {
            url: endpoint.clone(),
            source,
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to read apply-conditions error body");
                    String::new()
                }
            };
            tracing::warn!(
                plugin_id = %conditions.plugin_id,
                status = status.as_u16(),
                "apply-conditions request rejected"
            );
            return Err(IntegrationError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let decision: ApplyConditionsResponse =
            serde_json::from_slice(&bytes).map_err(IntegrationError::InvalidResponse)?;

        tracing::debug!(
            plugin_id = %conditions.plugin_id,
            resource_type = %conditions.resource_type,
            result = ?decision.result,
            "Applied conditions"
        );

        Ok(decision)
    }
}
