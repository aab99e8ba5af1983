//! Gateway configuration

use qna_core::{IdStrategy, RuleSet, Strictness};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::{GatewayError, DEFAULT_HOST, DEFAULT_PORT};

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Start with the seed question instead of an empty store
    pub seed: bool,

    /// Question text rules
    pub strictness: Strictness,

    /// How new ids are generated
    pub ids: IdStrategy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed: true,
            strictness: Strictness::Strict,
            ids: IdStrategy::Uuid,
        }
    }
}

impl GatewayConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_ids(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }

    /// Rule table derived from `strictness`
    pub fn rules(&self) -> RuleSet {
        RuleSet::new(self.strictness)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| GatewayError::InvalidConfig(format!("{}:{}: {}", self.host, self.port, e)))
    }

    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
