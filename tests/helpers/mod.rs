#![allow(dead_code)]

pub mod discovery;
pub mod mock_plugin;

pub use discovery::MockDiscovery;
pub use mock_plugin::{MockPlugin, MOCK_BASE_PATH};

use permbridge::permissions::{ConditionsToApply, PermissionCriteria};
use serde_json::json;

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_app(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind app");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("App failed");
    });
    format!("http://{addr}")
}

pub fn mock_conditions_json() -> serde_json::Value {
    json!({
        "not": {
            "allOf": [
                { "rule": "RULE_1", "params": [] },
                { "rule": "RULE_2", "params": ["abc"] },
            ]
        }
    })
}

pub fn mock_conditions() -> ConditionsToApply {
    let criteria: PermissionCriteria =
        serde_json::from_value(mock_conditions_json()).expect("Invalid mock conditions");
    ConditionsToApply {
        plugin_id: "test-plugin".to_string(),
        resource_type: "test-resource".to_string(),
        conditions: criteria,
    }
}
