//! The project anchor format.
//!
//! `anchor.yml` holds two YAML documents:
//!
//! ```yaml
//! ---
//! - demo
//! - '00'
//! - |-
//!   alice
//!   as
//!   lazy
//! ...
//! ---
//! # Replace 'true' with 'false' to activate your package.
//! ignore: true
//! ```
//!
//! The first is the record `[projectName, formatVersion, creator]`, the second
//! carries the ignore flag. Only format version `"00"` is valid.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// File name of the anchor at the project root.
pub const ANCHOR_FILE: &str = "anchor.yml";

/// Common misspelling reported as a hint when the anchor is missing.
pub const MISNAMED_ANCHOR_FILE: &str = "anchor.yaml";

/// The only anchor format version this release understands.
pub const FORMAT_VERSION: &str = "00";

const ACTIVATION_HINT: &str = "# Replace 'true' with 'false' to activate your package.";

/// Anchor parse errors.
#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("anchor is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("anchor must hold exactly 2 documents, found {0}")]
    DocumentCount(usize),

    #[error("malformed anchor: {0}")]
    Malformed(&'static str),
}

/// Parsed contents of `anchor.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnchor {
    pub project_name: String,
    pub format_version: String,
    /// `<system user> as <primary author>`, one part per line.
    pub creator: String,
    /// Inactive when set; new projects start ignored.
    pub ignore: bool,
}

#[derive(Serialize)]
struct AnchorFlags {
    ignore: bool,
}

impl ProjectAnchor {
    /// A fresh, inactive anchor in the current format.
    pub fn new(project_name: impl Into<String>, username: &str, primary_author: &str) -> Self {
        Self {
            project_name: project_name.into(),
            format_version: FORMAT_VERSION.to_string(),
            creator: creator_text(username, primary_author),
            ignore: true,
        }
    }

    /// Whether the anchor uses the supported format version.
    pub fn is_valid(&self) -> bool {
        self.format_version == FORMAT_VERSION
    }

    /// Serialize to the two-document form.
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        let record = serde_yaml::to_string(&[
            self.project_name.as_str(),
            self.format_version.as_str(),
            self.creator.as_str(),
        ])?;
        let flags = serde_yaml::to_string(&AnchorFlags { ignore: self.ignore })?;

        Ok(format!(
            "---\n{}...\n---\n{ACTIVATION_HINT}\n{}",
            strip_document_start(&record),
            strip_document_start(&flags),
        ))
    }

    /// Parse anchor text. Any structural problem is an error; the format
    /// version is not checked here, see [`ProjectAnchor::is_valid`].
    pub fn parse(text: &str) -> Result<Self, AnchorError> {
        let mut documents = Vec::with_capacity(2);
        for document in serde_yaml::Deserializer::from_str(text) {
            documents.push(Value::deserialize(document)?);
        }
        // A stray `---` at the end yields empty documents.
        while documents.len() > 2 && matches!(documents.last(), Some(Value::Null)) {
            documents.pop();
        }

        let [record, flags] = <[Value; 2]>::try_from(documents)
            .map_err(|docs| AnchorError::DocumentCount(docs.len()))?;

        let fields = match record {
            Value::Sequence(fields) if fields.len() == 3 => fields,
            Value::Sequence(_) => return Err(AnchorError::Malformed("record must have 3 entries")),
            _ => return Err(AnchorError::Malformed("first document must be a sequence")),
        };

        let text_field = |index: usize, what: &'static str| -> Result<String, AnchorError> {
            fields[index]
                .as_str()
                .map(str::to_string)
                .ok_or(AnchorError::Malformed(what))
        };

        let project_name = text_field(0, "project name must be a string")?;
        let format_version = text_field(1, "format version must be a string")?;
        let creator = text_field(2, "creator must be a string")?;

        if !flags.is_mapping() {
            return Err(AnchorError::Malformed("second document must be a mapping"));
        }
        let ignore = flags
            .get("ignore")
            .ok_or(AnchorError::Malformed("missing ignore flag"))?
            .as_bool()
            .ok_or(AnchorError::Malformed("ignore flag must be a boolean"))?;

        Ok(Self {
            project_name,
            format_version,
            creator,
            ignore,
        })
    }
}

/// Fail-closed validity check over raw anchor text.
pub fn is_valid_anchor(text: &str) -> bool {
    ProjectAnchor::parse(text)
        .map(|anchor| anchor.is_valid())
        .unwrap_or(false)
}

/// Creator block recorded in new anchors.
pub fn creator_text(username: &str, primary_author: &str) -> String {
    format!("{username}\nas\n{primary_author}")
}

fn strip_document_start(yaml: &str) -> &str {
    yaml.strip_prefix("---\n").unwrap_or(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_anchor_is_valid_and_ignored() {
        let anchor = ProjectAnchor::new("demo", "alice", "lazy");
        assert!(anchor.is_valid());
        assert!(anchor.ignore);
        assert_eq!(anchor.creator, "alice\nas\nlazy");
    }

    #[test]
    fn test_render_then_parse() {
        let anchor = ProjectAnchor::new("demo", "alice", "Ada");
        let text = anchor.render().unwrap();

        assert!(text.starts_with("---\n"));
        assert!(text.contains("\n...\n---\n"));
        assert!(text.contains(ACTIVATION_HINT));
        assert_eq!(ProjectAnchor::parse(&text).unwrap(), anchor);
    }

    #[test]
    fn test_render_quotes_the_version() {
        let text = ProjectAnchor::new("demo", "alice", "Ada").render().unwrap();
        assert!(text.contains("'00'") || text.contains("\"00\""));
    }

    #[test]
    fn test_names_that_look_like_scalars_survive() {
        for name in ["true", "123", "null", "00"] {
            let anchor = ProjectAnchor::new(name, "alice", "Ada");
            let parsed = ProjectAnchor::parse(&anchor.render().unwrap()).unwrap();
            assert_eq!(parsed.project_name, name);
        }
    }

    #[test]
    fn test_parse_hand_written_anchor() {
        let text = "---\n- demo\n- '00'\n- |-\n  alice\n  as\n  lazy\n...\n---\n# comment\nignore: TRUE\n";
        let anchor = ProjectAnchor::parse(text).unwrap();
        assert_eq!(anchor.project_name, "demo");
        assert!(anchor.is_valid());
        assert!(anchor.ignore);
    }

    #[test]
    fn test_other_version_is_not_valid() {
        let text = "---\n- demo\n- '01'\n- alice\n---\nignore: false\n";
        let anchor = ProjectAnchor::parse(text).unwrap();
        assert!(!anchor.is_valid());
        assert!(!is_valid_anchor(text));
    }

    #[test]
    fn test_numeric_version_is_malformed() {
        let text = "---\n- demo\n- 0\n- alice\n---\nignore: false\n";
        assert!(matches!(
            ProjectAnchor::parse(text),
            Err(AnchorError::Malformed(_))
        ));
    }

    #[test]
    fn test_unquoted_version_reads_as_string() {
        let text = "---\n- demo\n- 00\n- alice\n---\nignore: false\n";
        let anchor = ProjectAnchor::parse(text).unwrap();
        assert_eq!(anchor.format_version, "00");
        assert!(is_valid_anchor(text));
    }

    #[test]
    fn test_trailing_empty_document_is_tolerated() {
        let text = "---\n- demo\n- '00'\n- alice\n...\n---\nignore: false\n---\n";
        let anchor = ProjectAnchor::parse(text).unwrap();
        assert!(anchor.is_valid());
        assert!(!anchor.ignore);
    }

    #[test]
    fn test_third_document_with_content_is_rejected() {
        let text = "---\n- demo\n- '00'\n- alice\n---\nignore: false\n---\nextra: 1\n";
        assert!(matches!(
            ProjectAnchor::parse(text),
            Err(AnchorError::DocumentCount(3))
        ));
    }

    #[test]
    fn test_single_document_is_rejected() {
        let text = "- demo\n- '00'\n- alice\n";
        assert!(matches!(
            ProjectAnchor::parse(text),
            Err(AnchorError::DocumentCount(1))
        ));
    }

    #[test]
    fn test_missing_or_mistyped_ignore_flag() {
        let missing = "---\n- demo\n- '00'\n- alice\n---\nactive: true\n";
        let mistyped = "---\n- demo\n- '00'\n- alice\n---\nignore: maybe\n";
        assert!(!is_valid_anchor(missing));
        assert!(!is_valid_anchor(mistyped));
    }

    #[test]
    fn test_garbage_fails_closed() {
        assert!(!is_valid_anchor(""));
        assert!(!is_valid_anchor("{{{{"));
        assert!(!is_valid_anchor("---\n- [1, 2]\n---\n- 3\n"));
    }
}
