use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub brands_path: PathBuf,
    /// Bearer credential used by the CLI when none is passed explicitly.
    pub api_key: Option<String>,
    /// Base URL of the forwarding gateway the metrics client talks to.
    /// `None` in production when `RADAR_GATEWAY_URL` is unset.
    pub gateway_url: Option<String>,
    /// Upstream API root the gateway relays to.
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Deadline for supplementary branches; `0` disables it.
    pub branch_timeout_secs: u64,
    /// Deadline for mandatory branches; `0` disables it.
    pub mandatory_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Gateway route for the metrics client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no route is configured.
    pub fn gateway_url(&self) -> Result<&str, ConfigError> {
        self.gateway_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("RADAR_GATEWAY_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("gateway_url", &self.gateway_url)
            .field("upstream_base_url", &self.upstream_base_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("branch_timeout_secs", &self.branch_timeout_secs)
            .field("mandatory_timeout_secs", &self.mandatory_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
