use chatdock_core::util::DEFAULT_WELCOME_MESSAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::environment::{Endpoint, Environment};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Explicit base URL. When set, host classification is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Hostname the portal is served from.
    #[serde(default = "ApiConfig::default_host")]
    pub host: String,
    /// Treat any host as local.
    #[serde(default)]
    pub force_local: bool,
    #[serde(default = "ApiConfig::default_local_port")]
    pub local_port: u16,
    #[serde(default = "ApiConfig::default_cloud_url")]
    pub cloud_url: String,
    #[serde(default = "ApiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            host: Self::default_host(),
            force_local: false,
            local_port: Self::default_local_port(),
            cloud_url: Self::default_cloud_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    const fn default_local_port() -> u16 {
        8080
    }

    fn default_cloud_url() -> String {
        "https://contractor-portal-410182375480.us-central1.run.app".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        if self.force_local {
            Environment::Local
        } else {
            Environment::classify(&self.host)
        }
    }

    /// Resolve the base URL and environment for the current host.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        let environment = self.environment();
        let base_url = self.base_url.clone().unwrap_or_else(|| match environment {
            Environment::Local => format!("http://{}:{}", self.host, self.local_port),
            Environment::Cloud => self.cloud_url.clone(),
        });
        debug!("Resolved API endpoint {base_url} ({environment})");
        Endpoint {
            base_url,
            environment,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WidgetConfig {
    #[serde(default = "WidgetConfig::default_welcome_message")]
    pub welcome_message: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            welcome_message: Self::default_welcome_message(),
        }
    }
}

impl WidgetConfig {
    fn default_welcome_message() -> String {
        DEFAULT_WELCOME_MESSAGE.to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("chatdock"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'chatdock init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set api.host to the portal's hostname (or api.base_url directly)");
        println!("   2. Run 'chatdock login --token <TOKEN>' with your portal token");
        println!("   3. Run 'chatdock chat' to start a conversation");
        println!();
        Ok(())
    }

    fn write_template(path: &Path) -> anyhow::Result<()> {
        let config_template = r#"{
  "api": {
    "host": "localhost",
    "force_local": false,
    "local_port": 8080,
    "cloud_url": "https://contractor-portal-410182375480.us-central1.run.app",
    "timeout_secs": 30
  },
  "widget": {
    "welcome_message": "👋 Hi! I'm your AI assistant. How can I help you today?"
  }
}"#;
        std::fs::write(path, config_template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str("{}")?;
        assert_eq!(config.api.host, "localhost");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.widget.welcome_message, DEFAULT_WELCOME_MESSAGE);
        Ok(())
    }

    #[test]
    fn local_host_resolves_to_host_and_port() {
        let api = ApiConfig {
            host: "192.168.1.20".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(
            api.endpoint(),
            Endpoint {
                base_url: "http://192.168.1.20:8080".to_string(),
                environment: Environment::Local,
            }
        );
    }

    #[test]
    fn public_host_resolves_to_cloud_url() {
        let api = ApiConfig {
            host: "portal.example.com".to_string(),
            cloud_url: "https://api.example.com".to_string(),
            ..ApiConfig::default()
        };
        let endpoint = api.endpoint();
        assert_eq!(endpoint.environment, Environment::Cloud);
        assert_eq!(endpoint.base_url, "https://api.example.com");
    }

    #[test]
    fn force_local_overrides_classification() {
        let api = ApiConfig {
            host: "portal.example.com".to_string(),
            force_local: true,
            ..ApiConfig::default()
        };
        assert_eq!(
            api.endpoint().base_url,
            "http://portal.example.com:8080"
        );
    }

    #[test]
    fn explicit_base_url_wins() {
        let api = ApiConfig {
            base_url: Some("http://10.0.0.2:9000".to_string()),
            host: "portal.example.com".to_string(),
            ..ApiConfig::default()
        };
        let endpoint = api.endpoint();
        assert_eq!(endpoint.base_url, "http://10.0.0.2:9000");
        assert_eq!(endpoint.environment, Environment::Cloud);
    }

    #[test]
    fn template_round_trips_through_load() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        Config::write_template(&path)?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.api.local_port, 8080);
        assert!(config.api.base_url.is_none());
        Ok(())
    }

    #[test]
    fn invalid_json_names_the_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json")?;

        let err = Config::load_from(&path).err().map(|e| e.to_string());
        assert!(err.is_some_and(|e| e.contains("config.json")));
        Ok(())
    }
}
