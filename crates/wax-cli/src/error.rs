//! CLI error handling and formatting.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use wax_common_config::ConfigError;
use wax_project::{InitError, ValidateError};
use wax_registry::RegistryError;

pub mod formatter;
pub mod report;

pub use formatter::ErrorFormatter;
pub use report::{finish, install_panic_hook};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: BoxError,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
        url: Option<String>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
        expected: Option<String>,
        actual: Option<String>,
        hint: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        hint: Option<String>,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Network { .. } => "E003",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Numeric exit status for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Network { .. } => 4,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::User { .. } => 1,
            Self::Other(_) => 1,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::NotFound { hint, .. }
            | Self::User { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Io {
            message: message.into(),
            source: source.into(),
            path: None,
        }
    }

    /// Create a not found error
    pub fn not_found(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
            hint: None,
            suggestions: vec![],
        }
    }

    /// Attach a hint to errors that carry one
    pub fn with_hint(mut self, new_hint: impl Into<String>) -> Self {
        match &mut self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::NotFound { hint, .. }
            | Self::User { hint, .. } => *hint = Some(new_hint.into()),
            _ => {}
        }
        self
    }

    /// Attach a suggestion to a not found error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        if let Self::NotFound { suggestions, .. } = &mut self {
            suggestions.push(suggestion.into());
        }
        self
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            expected: None,
            actual: None,
            hint: None,
        }
    }

    /// Create a validation error about one field
    pub fn field_mismatch(
        message: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
            hint: None,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Box::new(err),
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("JSON serialization failed: {err}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound { .. } => "Check the --config path or the WAX_CONFIG variable",
            ConfigError::EnvVarNotFound { .. } => "Export the variable or remove the ${...} reference",
            _ => "Check your .wax/config.yaml file",
        };
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some(hint.to_string()),
        }
    }
}

impl From<InitError> for CliError {
    fn from(err: InitError) -> Self {
        match err {
            InitError::InvalidName { name, reason } => Self::Validation {
                message: format!("invalid project name {name:?}"),
                field: Some("name".to_string()),
                expected: Some(reason.to_string()),
                actual: Some(name),
                hint: None,
            },
            InitError::AlreadyExists { path } => Self::User {
                message: format!("{} already exists", path.display()),
                hint: Some("Choose another name or remove the existing directory".to_string()),
            },
            InitError::Io(e) => Self::Io {
                message: "failed to create project".to_string(),
                source: Box::new(e),
                path: None,
            },
            other @ InitError::Encode { .. } => Self::Other(anyhow::Error::new(other)),
        }
    }
}

impl From<ValidateError> for CliError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::Io(e) => Self::Io {
                message: "failed to read anchor.yml".to_string(),
                source: Box::new(e),
                path: None,
            },
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        match err {
            RegistryError::InvalidEndpoint { .. } => Self::Config {
                message,
                source: None,
                hint: Some("Set registry.endpoint to an http(s) URL".to_string()),
            },
            RegistryError::FileTooLarge { path, size, limit } => Self::Validation {
                message,
                field: Some("file size".to_string()),
                expected: Some(format!("at most {limit} bytes")),
                actual: Some(format!("{size} bytes in {}", path.display())),
                hint: Some("Raise registry.max_file_bytes or remove the file".to_string()),
            },
            RegistryError::Io { path, source } => Self::Io {
                message: "failed to read project file".to_string(),
                source: Box::new(source),
                path: Some(path),
            },
            RegistryError::Walk(e) => Self::Io {
                message: "failed to list project files".to_string(),
                path: e.path().map(PathBuf::from),
                source: Box::new(e),
            },
            RegistryError::Http(e) => Self::Network {
                message: "registry request failed".to_string(),
                url: e.url().map(|u| u.to_string()),
                source: Some(Box::new(e)),
            },
            RegistryError::Rejected { .. } => Self::Network {
                message,
                source: None,
                url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_statuses_follow_error_kind() {
        assert_eq!(CliError::config_with_hint("x", "y").exit_status(), 2);
        assert_eq!(
            CliError::io("x", io::Error::new(io::ErrorKind::Other, "boom")).exit_status(),
            3
        );
        assert_eq!(CliError::validation("x").exit_status(), 5);
        assert_eq!(
            CliError::not_found("file", "anchor.yml", "x").exit_status(),
            6
        );
        assert_eq!(CliError::user_with_hint("x", "y").exit_status(), 1);
    }

    #[test]
    fn hints_and_suggestions_attach_to_not_found() {
        let err = CliError::not_found("file", "anchor.yml", "missing")
            .with_hint("check the name")
            .with_suggestion("rename it");
        assert_eq!(err.hint(), Some("check the name"));
        assert_eq!(err.suggestions(), ["rename it".to_string()]);
    }

    #[test]
    fn invalid_name_becomes_validation_error() {
        let err: CliError = InitError::InvalidName {
            name: "a/b".to_string(),
            reason: "must be a single path component",
        }
        .into();
        assert_eq!(err.exit_status(), 5);
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn existing_directory_is_user_error_with_hint() {
        let err: CliError = InitError::AlreadyExists {
            path: PathBuf::from("demo"),
        }
        .into();
        assert_eq!(err.exit_status(), 1);
        assert!(err.hint().is_some());
        assert!(err.to_string().contains("demo"));
    }

    #[test]
    fn rejected_upload_is_network_error() {
        let err: CliError = RegistryError::Rejected {
            status: 403,
            path: "index.yml".to_string(),
            message: "forbidden".to_string(),
        }
        .into();
        assert_eq!(err.exit_status(), 4);
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn oversized_file_is_validation_error() {
        let err: CliError = RegistryError::FileTooLarge {
            path: PathBuf::from("blob.bin"),
            size: 10,
            limit: 5,
        }
        .into();
        assert_eq!(err.exit_status(), 5);
    }
}
