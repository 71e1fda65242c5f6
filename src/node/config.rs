use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::directory::{NodeDirectory, NodeEntry};

pub const DEFAULT_BIND: &str = "127.0.0.1:8686";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no nodes configured")]
    NoNodes,

    #[error("node entry {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("invalid bind address {0:?}")]
    InvalidBind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { bind: DEFAULT_BIND.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

/// Gateway configuration file.
///
/// ```toml
/// [api]
/// bind = "127.0.0.1:8686"
///
/// [logging]
/// filter = "info,oasis_gateway=debug"
///
/// [[nodes]]
/// node_name = "validator-1"
/// ws_url = "ws://127.0.0.1:42280"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
}

impl GatewayConfig {
    /// Load and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let cfg: GatewayConfig = data.parse()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if node.node_name.is_empty() {
                return Err(ConfigError::EmptyField { index, field: "node_name" });
            }
            if node.ws_url.is_empty() {
                return Err(ConfigError::EmptyField { index, field: "ws_url" });
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.api
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.api.bind.clone()))
    }

    /// Immutable directory built from the `[[nodes]]` table.
    pub fn directory(&self) -> NodeDirectory {
        NodeDirectory::new(self.nodes.clone())
    }
}

impl std::str::FromStr for GatewayConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
