//! Output formatting utilities for CLI commands.

pub mod color;

use serde::Serialize;
use wax_project::AnchorStatus;
use wax_registry::UploadReceipt;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    let output = match ctx.format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };

    println!("{output}");
    Ok(())
}

/// Result of `wax new`.
#[derive(Debug, Serialize)]
pub struct NewOutput {
    pub name: String,
    pub root: String,
    pub kind: &'static str,
    pub created: Vec<String>,
}

impl FormattedOutput for NewOutput {
    fn format_text(&self) -> String {
        let mut text = format!("Created {} project {} at {}", self.kind, self.name, self.root);
        for path in &self.created {
            text.push_str("\n+ ");
            text.push_str(path);
        }
        text
    }
}

/// Result of `wax verify` for a valid anchor.
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    #[serde(flatten)]
    pub status: AnchorStatus,
    pub message: &'static str,
}

impl VerifyOutput {
    pub const VALID: &'static str = "This project is valid.";
    pub const IGNORED: &'static str = "This project is valid, but the ignore flag is set.";

    pub fn new(status: AnchorStatus) -> Self {
        let message = match status {
            AnchorStatus::Valid { ignored: true } => Self::IGNORED,
            _ => Self::VALID,
        };
        Self { status, message }
    }
}

impl FormattedOutput for VerifyOutput {
    fn format_text(&self) -> String {
        self.message.to_string()
    }
}

/// Result of `wax upload`.
#[derive(Debug, Serialize)]
pub struct UploadOutput {
    #[serde(flatten)]
    pub receipt: UploadReceipt,
}

impl FormattedOutput for UploadOutput {
    fn format_text(&self) -> String {
        format!(
            "Uploaded {} ({} files, {} bytes).",
            self.receipt.package, self.receipt.files, self.receipt.bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_messages_depend_on_ignore_flag() {
        assert_eq!(
            VerifyOutput::new(AnchorStatus::Valid { ignored: false }).format_text(),
            "This project is valid."
        );
        assert_eq!(
            VerifyOutput::new(AnchorStatus::Valid { ignored: true }).format_text(),
            "This project is valid, but the ignore flag is set."
        );
    }

    #[test]
    fn verify_json_flattens_status() {
        let json = VerifyOutput::new(AnchorStatus::Valid { ignored: true })
            .format_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "valid");
        assert_eq!(value["ignored"], true);
    }

    #[test]
    fn new_output_lists_created_paths() {
        let out = NewOutput {
            name: "demo".to_string(),
            root: "/tmp/demo".to_string(),
            kind: "application",
            created: vec!["index.yml".to_string(), "src/".to_string()],
        };
        let text = out.format_text();
        assert!(text.starts_with("Created application project demo at /tmp/demo"));
        assert!(text.contains("\n+ src/"));
    }

    #[test]
    fn upload_summary() {
        let out = UploadOutput {
            receipt: UploadReceipt {
                package: "demo".to_string(),
                files: 3,
                bytes: 120,
            },
        };
        assert_eq!(out.format_text(), "Uploaded demo (3 files, 120 bytes).");
    }
}
