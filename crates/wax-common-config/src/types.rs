//! Configuration types.

use serde::{Deserialize, Serialize};
use wax_common_secret::SecretString;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaxConfig {
    /// Project scaffolding settings.
    pub scaffold: ScaffoldConfig,
    /// Package registry settings.
    pub registry: RegistryConfig,
}

/// Settings used by `wax new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Extension of generated Qyri source files, without the dot.
    pub source_extension: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            source_extension: "qi".to_string(),
        }
    }
}

/// Settings used by `wax upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the package registry.
    pub endpoint: Option<String>,
    /// Access token. Falls back to `WAX_REGISTRY_TOKEN` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<SecretString>,
    /// Largest single file accepted in a package.
    pub max_file_bytes: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            max_file_bytes: 150 * 1024 * 1024,
            timeout_secs: 30,
        }
    }
}
