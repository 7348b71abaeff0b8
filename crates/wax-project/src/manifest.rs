//! The `index.yml` project manifest.

use serde::{Deserialize, Serialize};

/// File name of the manifest at the project root.
pub const MANIFEST_FILE: &str = "index.yml";

/// Version given to every new project.
pub const INITIAL_VERSION: &str = "a0.0.1";

/// Author recorded when none is given.
pub const DEFAULT_AUTHOR: &str = "lazy";

/// Project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub metadata: Metadata,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// The `metadata` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub authors: Vec<String>,
    pub version: String,
}

impl ProjectManifest {
    /// Manifest for a new project. An empty author list becomes
    /// `["lazy"]`.
    pub fn new(name: impl Into<String>, authors: &[String]) -> Self {
        Self {
            metadata: Metadata {
                name: name.into(),
                authors: effective_authors(authors),
                version: INITIAL_VERSION.to_string(),
            },
            dependencies: Vec::new(),
        }
    }

    /// First listed author.
    pub fn primary_author(&self) -> &str {
        self.metadata
            .authors
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_AUTHOR)
    }

    /// Serialize as a single YAML document.
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        let body = serde_yaml::to_string(self)?;
        if body.starts_with("---") {
            Ok(body)
        } else {
            Ok(format!("---\n{body}"))
        }
    }

    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// Authors as they will be recorded.
pub fn effective_authors(authors: &[String]) -> Vec<String> {
    if authors.is_empty() {
        vec![DEFAULT_AUTHOR.to_string()]
    } else {
        authors.to_vec()
    }
}
