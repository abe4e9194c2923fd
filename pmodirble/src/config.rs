//! Client configuration
//!
//! Settings can come from a YAML document, from the environment, or both
//! (environment wins):
//!
//! ```yaml
//! token: "0123456789abcdef"
//! base_url: "http://api.dirble.com/v2/"
//! timeout_secs: 30
//! user_agent: "pmodirble/0.1.0"
//! proxy: null
//! ```
//!
//! ```no_run
//! use pmodirble::{DirbleClient, DirbleConfig};
//!
//! # fn main() -> pmodirble::Result<()> {
//! let config = DirbleConfig::from_file("dirble.yaml")?.apply_env_overrides()?;
//! let client = DirbleClient::builder().with_config(&config).build()?;
//! # Ok(())
//! # }
//! ```

use crate::client::{DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "DIRBLE_TOKEN";
/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "DIRBLE_BASE_URL";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "DIRBLE_TIMEOUT_SECS";
/// Environment variable overriding the User-Agent
pub const ENV_USER_AGENT: &str = "DIRBLE_USER_AGENT";
/// Environment variable holding a proxy URL
pub const ENV_PROXY: &str = "DIRBLE_PROXY";

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Settings used to build a [`DirbleClient`](crate::DirbleClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirbleConfig {
    /// API token, required to build a client
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Default for DirbleConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            proxy: None,
        }
    }
}

impl DirbleConfig {
    /// Parse a YAML document
    ///
    /// Missing keys take their default value; an empty document is valid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading Dirble configuration");
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Default configuration overridden by the environment
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env_overrides()
    }

    /// Override fields with the `DIRBLE_*` environment variables that are set
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TOKEN) {
            debug!(env_var = ENV_TOKEN, "Token taken from environment");
            self.token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            debug!(env_var = ENV_BASE_URL, base_url = %base_url, "Base URL override");
            self.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} must be a number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, timeout
                ))
            })?;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = user_agent;
        }
        if let Some(proxy) = lookup(ENV_PROXY) {
            self.proxy = Some(proxy);
        }
        Ok(self)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
