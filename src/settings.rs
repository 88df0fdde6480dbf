use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    #[serde(default)]
    pub discovery: Discovery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// If set, this is used as the externally reachable base URL, e.g. https://portal.example.com
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Discovery {
    /// Per-plugin overrides of the default `<base>/api/<pluginId>` layout
    #[serde(default)]
    pub endpoints: Vec<EndpointOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointOverride {
    /// Internal base URL. May contain `{{pluginId}}`.
    pub target: String,
    /// External base URL. Falls back to `target` when unset.
    #[serde(default)]
    pub external_target: Option<String>,
    /// Plugin ids served by this target
    pub plugins: Vec<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7007,
            public_base_url: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", Server::default().host)
            .into_diagnostic()?
            .set_default("server.port", Server::default().port)
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: PERMBRIDGE__SERVER__PORT=9090, etc.
        builder =
            builder.add_source(config::Environment::with_prefix("PERMBRIDGE").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let s: Settings = cfg.try_deserialize().into_diagnostic()?;
        Ok(s)
    }

    /// Base URL other backends on the same network use to reach this host.
    pub fn internal_base_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "" | "0.0.0.0" | "::" | "[::]" => "localhost",
            other => other,
        };
        format!("http://{}:{}", host, self.server.port)
    }

    pub fn external_base_url(&self) -> String {
        if let Some(base) = &self.server.public_base_url {
            base.trim_end_matches('/').to_string()
        } else {
            self.internal_base_url()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_settings_load_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nonexistent.toml");

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 7007);
        assert!(settings.discovery.endpoints.is_empty());
    }

    #[test]
    fn test_settings_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let config_content = r#"
[server]
host = "127.0.0.1"
port = 9191

[[discovery.endpoints]]
target = "http://catalog-svc:7007/api/{{pluginId}}"
external_target = "https://catalog.example.com/api/{{pluginId}}"
plugins = ["catalog", "search"]
"#;
        fs::write(&config_path, config_content).expect("Failed to write config");

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9191);
        assert_eq!(settings.discovery.endpoints.len(), 1);
        let endpoint = &settings.discovery.endpoints[0];
        assert_eq!(endpoint.target, "http://catalog-svc:7007/api/{{pluginId}}");
        assert_eq!(endpoint.plugins, vec!["catalog", "search"]);
    }

    #[test]
    fn test_settings_env_override() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let config_content = r#"
[server]
host = "127.0.0.1"
port = 7007
public_base_url = "https://from-file.example.com"
"#;
        fs::write(&config_path, config_content).expect("Failed to write config");

        // Only the public URL is overridden so tests reading host/port in
        // parallel are unaffected
        env::set_var(
            "PERMBRIDGE__SERVER__PUBLIC_BASE_URL",
            "https://from-env.example.com",
        );

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        env::remove_var("PERMBRIDGE__SERVER__PUBLIC_BASE_URL");

        assert_eq!(
            settings.server.public_base_url,
            Some("https://from-env.example.com".to_string())
        );
        assert_eq!(settings.server.port, 7007);
    }

    #[test]
    fn test_internal_base_url_replaces_wildcard_host() {
        let settings = Settings::default();
        assert_eq!(settings.internal_base_url(), "http://localhost:7007");

        let mut settings = Settings::default();
        settings.server.host = "backend".to_string();
        settings.server.port = 3000;
        assert_eq!(settings.internal_base_url(), "http://backend:3000");
    }

    #[test]
    fn test_external_base_url_trims_trailing_slash() {
        let mut settings = Settings::default();
        settings.server.public_base_url = Some("https://portal.example.com/".to_string());
        assert_eq!(settings.external_base_url(), "https://portal.example.com");
    }

    #[test]
    fn test_external_base_url_fallback() {
        let mut settings = Settings::default();
        settings.server.host = "localhost".to_string();
        settings.server.port = 3000;
        assert_eq!(settings.external_base_url(), "http://localhost:3000");
    }
}
