use anyhow::{Context, Result};
use mimic_core::{FailurePolicy, RunnerConfig};
use mimic_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "MIMIC_CONFIG";

/// Full configuration; every field has a default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimicConfig {
    pub runner: RunnerSection,
    pub gateway: GatewaySection,
    pub store: StoreSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    pub failure_policy: FailurePolicy,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    pub bind: String,
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            timeout_ms: Some(30_000),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub dir: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".mimic"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// JSON lines instead of human-readable output
    pub json: bool,
}

impl MimicConfig {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            failure_policy: self.runner.failure_policy,
            request_timeout: self.runner.request_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        let defaults = GatewayConfig::default();
        GatewayConfig {
            timeout: self.gateway.timeout_ms.map(Duration::from_millis),
            user_agent: self
                .gateway
                .user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.gateway
            .bind
            .parse()
            .with_context(|| format!("Invalid gateway bind address: {}", self.gateway.bind))
    }
}

/// Loads configuration from files or strings
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<MimicConfig> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read YAML file: {:?}", path.as_ref())
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<MimicConfig> {
        let config: MimicConfig = serde_yaml::from_str(content)
            .with_context(|| "Failed to parse YAML content")?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<MimicConfig> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read JSON file: {:?}", path.as_ref())
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<MimicConfig> {
        let config: MimicConfig = serde_json::from_str(content)
            .with_context(|| "Failed to parse JSON content")?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// File named by `MIMIC_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<MimicConfig> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                tracing::info!(path = %path.display(), "loading configuration");
                match path.extension().and_then(|ext| ext.to_str()) {
                    Some("json") => Self::from_json_file(&path),
                    _ => Self::from_yaml_file(&path),
                }
            }
            None => Ok(MimicConfig::default()),
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml<P: AsRef<Path>>(config: &MimicConfig, path: P) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)
            .with_context(|| "Failed to serialize config to YAML")?;

        fs::write(&path, yaml_content).with_context(|| {
            format!("Failed to write YAML file: {:?}", path.as_ref())
        })?;

        Ok(())
    }

    /// Basic validity checks
    pub fn validate(config: &MimicConfig) -> Result<()> {
        config.bind_addr()?;

        if config.runner.request_timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("runner.request_timeout_ms must be greater than zero"));
        }
        if config.gateway.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("gateway.timeout_ms must be greater than zero"));
        }
        if config.store.dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("store.dir cannot be empty"));
        }

        Ok(())
    }
}
