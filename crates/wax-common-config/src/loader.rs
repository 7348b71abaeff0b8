//! Configuration file loading and parsing.

use crate::types::WaxConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Location of the config file relative to the working directory.
pub const CONFIG_FILE: &str = ".wax/config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    source: ConfigSource,
}

enum ConfigSource {
    /// `<dir>/.wax/config.yaml`, defaults when absent.
    Directory(PathBuf),
    /// An explicit file that must exist.
    File(PathBuf),
}

impl ConfigLoader {
    /// Create a loader for the given working directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            source: ConfigSource::Directory(dir.as_ref().to_path_buf()),
        }
    }

    /// Create a loader for an explicit config file.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: ConfigSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// Path the loader will read.
    pub fn path(&self) -> PathBuf {
        match &self.source {
            ConfigSource::Directory(dir) => dir.join(CONFIG_FILE),
            ConfigSource::File(path) => path.clone(),
        }
    }

    /// Load the configuration.
    pub fn load(&self) -> Result<WaxConfig, ConfigError> {
        let config_path = self.path();

        if !config_path.exists() {
            return match self.source {
                ConfigSource::Directory(_) => {
                    debug!(path = %config_path.display(), "no config file, using defaults");
                    Ok(WaxConfig::default())
                }
                ConfigSource::File(_) => Err(ConfigError::NotFound { path: config_path }),
            };
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config text, expanding `${VAR}` references first.
    pub fn parse(contents: &str) -> Result<WaxConfig, ConfigError> {
        let expanded = expand_env_vars(contents)?;

        // An empty or comment-only file is a null document.
        if expanded.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(WaxConfig::default());
        }

        let config: WaxConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        validate(&config)?;
        Ok(config)
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("static regex");
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    for cap in re.captures_iter(content) {
        let Some(full_match) = cap.get(0) else { continue };
        let var_name = &cap[1];

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match cap.get(2) {
                Some(d) => d.as_str().to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result.push_str(&content[last..full_match.start()]);
        result.push_str(&value);
        last = full_match.end();
    }

    result.push_str(&content[last..]);
    Ok(result)
}

/// Validate configuration values.
fn validate(config: &WaxConfig) -> Result<(), ConfigError> {
    let ext = &config.scaffold.source_extension;
    if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError {
            message: format!("scaffold.source_extension must be a bare extension, got {ext:?}"),
        });
    }

    if let Some(endpoint) = &config.registry.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("registry.endpoint must be an http(s) URL, got {endpoint:?}"),
            });
        }
    }

    if config.registry.max_file_bytes == 0 {
        return Err(ConfigError::ValidationError {
            message: "registry.max_file_bytes must be greater than 0".to_string(),
        });
    }

    if config.registry.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            message: "registry.timeout_secs must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.scaffold.source_extension, "qi");
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let result = ConfigLoader::from_file(dir.path().join("wax.yaml")).load();
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".wax")).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
scaffold:
  source_extension: qy
registry:
  endpoint: http://localhost:9000
  max_file_bytes: 1024
"#,
        )
        .unwrap();

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.scaffold.source_extension, "qy");
        assert_eq!(config.registry.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.registry.max_file_bytes, 1024);
        assert_eq!(config.registry.timeout_secs, 30);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ConfigLoader::parse("# nothing configured yet\n").unwrap();
        assert_eq!(config.scaffold.source_extension, "qi");
    }

    #[test]
    fn test_env_var_default() {
        let result = expand_env_vars("key: ${WAX_TEST_NONEXISTENT:-fallback}").unwrap();
        assert_eq!(result, "key: fallback");
    }

    #[test]
    fn test_env_var_missing_error() {
        match expand_env_vars("key: ${WAX_TEST_MISSING_VAR}") {
            Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "WAX_TEST_MISSING_VAR"),
            other => panic!("expected EnvVarNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_token_from_env_expansion() {
        std::env::set_var("WAX_TEST_TOKEN_EXPANSION", "sl.expanded");
        let config = ConfigLoader::parse("registry:\n  token: ${WAX_TEST_TOKEN_EXPANSION}\n").unwrap();
        std::env::remove_var("WAX_TEST_TOKEN_EXPANSION");

        assert_eq!(
            config.registry.token.as_ref().map(|t| t.expose().as_str()),
            Some("sl.expanded")
        );
    }

    #[test]
    fn test_validation_errors() {
        for yaml in [
            "scaffold:\n  source_extension: .qi\n",
            "scaffold:\n  source_extension: ''\n",
            "registry:\n  endpoint: ftp://example.test\n",
            "registry:\n  max_file_bytes: 0\n",
            "registry:\n  timeout_secs: 0\n",
        ] {
            let result = ConfigLoader::parse(yaml);
            assert!(
                matches!(result, Err(ConfigError::ValidationError { .. })),
                "expected validation error for {yaml:?}"
            );
        }
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let bad_yaml = "\nregistry:\n  endpoint: [unclosed\n";
        match ConfigLoader::parse(bad_yaml) {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }
}
