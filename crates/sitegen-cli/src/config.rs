use serde::Deserialize;
use sitegen_agent::ModelConfig;
use sitegen_core::{SitegenError, SitegenResult};
use sitegen_orchestrator::{ExecutionMode, OrchestratorConfig};
use std::path::Path;
use std::time::Duration;

/// Contents of `sitegen.toml`.
#[derive(Debug, Deserialize)]
pub struct SitegenConfig {
    pub model: ModelConfig,
    /// Environment variable holding the backend key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub orchestrator: OrchestratorSection,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize)]
pub struct OrchestratorSection {
    #[serde(default = "default_agent_timeout_ms")]
    pub agent_timeout_ms: u64,
    #[serde(default)]
    pub mode: ExecutionMode,
}

impl Default for OrchestratorSection {
    fn default() -> Self {
        Self {
            agent_timeout_ms: default_agent_timeout_ms(),
            mode: ExecutionMode::default(),
        }
    }
}

impl OrchestratorSection {
    pub fn to_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            agent_timeout: Duration::from_millis(self.agent_timeout_ms),
            default_mode: self.mode,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_api_key_env() -> String {
    "SITEGEN_API_KEY".to_string()
}
fn default_agent_timeout_ms() -> u64 {
    60_000
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl SitegenConfig {
    /// Parse and check a config document.
    pub fn parse(raw: &str) -> SitegenResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| SitegenError::Config(e.to_string()))?;
        if config.orchestrator.agent_timeout_ms == 0 {
            return Err(SitegenError::Config(
                "orchestrator.agent_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    /// Read and parse the config file at `path`.
    pub async fn load(path: &Path) -> SitegenResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            SitegenError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
    }
}
