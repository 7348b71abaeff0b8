//! Environment variable handling.

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wax_common_secret::SecretString;

use crate::types::WaxConfig;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    /// Registry access token.
    pub const WAX_REGISTRY_TOKEN: &str = "WAX_REGISTRY_TOKEN";
    /// Explicit config file path.
    pub const WAX_CONFIG: &str = "WAX_CONFIG";

    // Creator identity
    pub const USER: &str = "USER";
    pub const USERNAME: &str = "USERNAME";
}

/// Fallback when no user name can be determined.
pub const UNKNOWN_USER: &str = "unknown";

/// Env files read at startup, highest precedence first.
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// What happened to one env file during [`Environment::init`].
#[derive(Debug)]
pub enum EnvFileLoad {
    Loaded(PathBuf),
    Failed { path: PathBuf, error: dotenvy::Error },
}

/// Environment access.
pub struct Environment {
    files: Vec<EnvFileLoad>,
}

impl Environment {
    /// Load env files from the working directory.
    pub fn init() -> Self {
        Self::init_in(env::current_dir().unwrap_or_default())
    }

    /// Load `.env.local` then `.env` from `dir`. Variables already set are
    /// never replaced, so the shell beats `.env.local`, which beats `.env`.
    /// Missing files are skipped.
    pub fn init_in(dir: impl AsRef<Path>) -> Self {
        let mut files = Vec::new();
        for name in ENV_FILES {
            let path = dir.as_ref().join(name);
            match dotenvy::from_filename(&path) {
                Ok(_) => files.push(EnvFileLoad::Loaded(path)),
                Err(e) if e.not_found() => {}
                Err(error) => files.push(EnvFileLoad::Failed { path, error }),
            }
        }
        Self { files }
    }

    /// Env files that were found.
    pub fn files(&self) -> &[EnvFileLoad] {
        &self.files
    }

    /// Log what [`Environment::init`] found. Call once logging is set up.
    pub fn log_loaded(&self) {
        for file in &self.files {
            match file {
                EnvFileLoad::Loaded(path) => {
                    tracing::debug!(path = %path.display(), "loaded env file")
                }
                EnvFileLoad::Failed { path, error } => {
                    tracing::warn!(path = %path.display(), %error, "ignoring unreadable env file")
                }
            }
        }
    }

    /// Get an optional, non-blank variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        Self::get(var).ok_or_else(|| EnvError::NotSet {
            var: var.to_string(),
        })
    }

    /// Name of the user running Wax, recorded in new anchors.
    pub fn username() -> String {
        Self::get(vars::USER)
            .or_else(|| Self::get(vars::USERNAME))
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }
}

/// Resolve the registry token: config first, then `WAX_REGISTRY_TOKEN`.
pub fn registry_token(config: &WaxConfig) -> Result<SecretString, EnvError> {
    if let Some(token) = config.registry.token.as_ref().filter(|t| !t.is_blank()) {
        return Ok(token.clone());
    }
    Environment::require(vars::WAX_REGISTRY_TOKEN).map(SecretString::new)
}
