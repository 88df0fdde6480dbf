use std::sync::Mutex;

use async_trait::async_trait;
use permbridge::discovery::{DiscoveryError, PluginEndpointDiscovery};

/// Discovery that hands out a fixed base URL and remembers who asked
pub struct MockDiscovery {
    base_url: String,
    pub asked_for: Mutex<Vec<String>>,
}

impl MockDiscovery {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            asked_for: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PluginEndpointDiscovery for MockDiscovery {
    async fn get_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError> {
        self.asked_for.lock().unwrap().push(plugin_id.to_string());
        Ok(self.base_url.clone())
    }

    async fn get_external_base_url(&self, plugin_id: &str) -> Result<String, DiscoveryError> {
        self.get_base_url(plugin_id).await
    }
}
