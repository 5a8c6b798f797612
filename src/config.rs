use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable naming the YAML config file to load.
const CONFIG_ENV: &str = "VIGIL_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Per-connection resource bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of concurrently served connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Idle read timeout in seconds. A connection that sends nothing for this
    /// long while a request is awaited is closed.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Timeout in seconds for writing a complete response.
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Cap on buffered request bytes before the request is rejected.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_connections() -> usize {
    1024
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_write_timeout_secs() -> u64 {
    30
}

fn default_max_request_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl LimitsConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl Config {
    /// Loads the configuration for this process.
    ///
    /// If `VIGIL_CONFIG` names a file it is parsed as YAML; otherwise defaults
    /// apply. The `LISTEN` environment variable overrides the listen address
    /// either way. A named-but-unreadable or invalid file is a fatal error.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {path}"))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
