//! Plugin endpoint discovery.
//!
//! Backend plugins reach each other through base URLs looked up by plugin id.
//! `HostDiscovery` assumes every plugin is mounted under `/api/<pluginId>` of
//! a single host unless `discovery.endpoints` in the settings routes the plugin
//! elsewhere.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::settings::{EndpointOverride, Settings};

const PLUGIN_ID_PLACEHOLDERS: [&str; 2] = ["{{pluginId}}", "{{ pluginId }}"];

#[derive(Debug, Error, Diagnostic)]
pub enum DiscoveryError {
    #[error("Plugin id must not be empty")]
    #[diagnostic(code(permbridge::discovery::empty_plugin_id))]
    EmptyPluginId,

    #[error("Invalid base URL `{target}` for plugin `{plugin_id}`")]
    #[diagnostic(
        code(permbridge::discovery::invalid_target),
        help("Discovery targets must be absolute URLs, e.g. http://catalog:7007/api/{{{{pluginId}}}}")
    )]
    InvalidTarget {
        plugin_id: String,
        target: String,
        #[source]
        source: url::ParseError,
    },
}

/// Resolves the base URL of a backend plugin.
#[async_trait]
pub trait PluginEndpointDiscovery: Send + Sync {
    /// Base URL for backend-to-backend calls.
    async fn get_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError>;

    /// Base URL for calls made from outside the backend network, e.g. browsers.
    async fn get_external_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError>;
}

#[derive(Debug, Clone)]
pub struct HostDiscovery {
    internal_base: String,
    external_base: String,
    endpoints: Vec<EndpointOverride>,
}

impl HostDiscovery {
    pub fn new(internal_base: impl Into<String>, external_base: impl Into<String>) -> Self {
        Self {
            internal_base: internal_base.into().trim_end_matches('/').to_string(),
            external_base: external_base.into().trim_end_matches('/').to_string(),
            endpoints: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut discovery = Self::new(settings.internal_base_url(), settings.external_base_url());
        discovery.endpoints = settings.discovery.endpoints.clone();
        discovery
    }

    pub fn with_endpoint(mut self, endpoint: EndpointOverride) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    fn resolve(&self, plugin_id: &str, external: bool) -> Result<String, DiscoveryError> {
        if plugin_id.trim().is_empty() {
            return Err(DiscoveryError::EmptyPluginId);
        }

        let routed = self
            .endpoints
            .iter()
            .find(|e| e.plugins.iter().any(|p| p == plugin_id));

        let url = match routed {
            Some(endpoint) => {
                let target = if external {
                    endpoint
                        .external_target
                        .as_deref()
                        .unwrap_or(&endpoint.target)
                } else {
                    &endpoint.target
                };
                substitute_plugin_id(target, plugin_id)
            }
            None => {
                let base = if external {
                    &self.external_base
                } else {
                    &self.internal_base
                };
                format!("{base}/api/{plugin_id}")
            }
        };
        let url = url.trim_end_matches('/').to_string();

        url::Url::parse(&url).map_err(|source| DiscoveryError::InvalidTarget {
            plugin_id: plugin_id.to_string(),
            target: url.clone(),
            source,
        })?;

        Ok(url)
    }
}

fn substitute_plugin_id(target: &str, plugin_id: &str) -> String {
    PLUGIN_ID_PLACEHOLDERS
        .iter()
        .fold(target.to_string(), |acc, placeholder| {
            acc.replace(placeholder, plugin_id)
        })
}

#[async_trait]
impl PluginEndpointDiscovery for HostDiscovery {
    async fn get_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError> {
        let url = self.resolve(plugin_id, false)?;
        tracing::debug!(plugin_id, %url, "Resolved plugin base URL");
        Ok(url)
    }

    async fn get_external_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError> {
        let url = self.resolve(plugin_id, true)?;
        tracing::debug!(plugin_id, %url, "Resolved external plugin base URL");
        Ok(url)
    }
}
