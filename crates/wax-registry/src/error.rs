use std::path::PathBuf;

use thiserror::Error;

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed to walk project directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry rejected {path} with status {status}: {message}")]
    Rejected {
        status: u16,
        path: String,
        message: String,
    },
}
