//! Runtime configuration loaded from TOML.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BridgeError, BridgeResult, ProxyTemplate};

/// Complete bridge configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Execution limits
    pub execution: ExecutionConfig,
    /// Read-only globals defined in every context
    pub globals: BTreeMap<String, Value>,
    /// Proxies installed in every context
    pub proxies: Vec<ProxyConfig>,
}

/// Default wall-clock timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default cap on iterations of a single loop.
///
/// Boa cannot interrupt a running script, so a timed-out evaluation keeps its
/// blocking thread until this limit ends the loop.
pub const DEFAULT_LOOP_ITERATION_LIMIT: u64 = 10_000_000;

/// Execution limits applied to each evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Wall-clock timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum iterations of any single loop
    pub loop_iteration_limit: u64,
    /// Maximum call depth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursion_limit: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            loop_iteration_limit: DEFAULT_LOOP_ITERATION_LIMIT,
            recursion_limit: None,
        }
    }
}

impl ExecutionConfig {
    /// Timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A proxy bound to a global name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Global variable the proxy is bound to
    pub global: String,
    /// The proxy's shape
    #[serde(flatten)]
    pub template: ProxyTemplate,
}

impl BridgeConfig {
    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns [`BridgeError::Io`] if the file cannot be read and
    /// [`BridgeError::Config`] if it cannot be parsed
    pub fn load_from_file(path: &Path) -> BridgeResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;

        tracing::debug!(
            "Loaded config from {:?}: {} globals, {} proxies",
            path,
            config.globals.len(),
            config.proxies.len()
        );

        Ok(config)
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    /// Returns an error if the text is not a valid configuration
    pub fn from_toml_str(contents: &str) -> BridgeResult<Self> {
        toml::from_str(contents)
            .map_err(|error| BridgeError::Config(format!("Failed to parse config: {error}")))
    }

    /// Render the config as TOML
    ///
    /// # Errors
    /// Returns an error if a value has no TOML form (e.g. a `null` global)
    pub fn to_toml_string(&self) -> BridgeResult<String> {
        toml::to_string_pretty(self)
            .map_err(|error| BridgeError::Config(format!("Failed to serialize config: {error}")))
    }
}
