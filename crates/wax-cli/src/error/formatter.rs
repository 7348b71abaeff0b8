//! Error formatting for CLI output.

use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};

use crate::error::CliError;
use crate::output::color::{Color, ColorMode, Styled};

/// Error output formatter
pub struct ErrorFormatter {
    color_mode: ColorMode,
    is_terminal: bool,
    verbose: bool,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            is_terminal: io::stderr().is_terminal(),
            verbose: false,
        }
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Format and print an error
    pub fn print(&self, error: &CliError) {
        let formatted = self.format(error);
        eprint!("{formatted}");
    }

    fn styled(&self, text: impl Into<String>, color: Color) -> Styled {
        Styled::new(text)
            .with_color_mode(self.color_mode, self.is_terminal)
            .fg(color)
    }

    /// Format an error to a string
    pub fn format(&self, error: &CliError) -> String {
        let mut output = String::new();

        let error_prefix = self.styled(format!("error[{}]:", error.code()), Color::Red).bold();
        let _ = writeln!(output, "{error_prefix} {error}");

        if self.verbose {
            self.format_source_chain(&mut output, error);
        }

        self.format_context(&mut output, error);

        if let Some(hint) = error.hint() {
            let hint_label = self.styled("hint:", Color::Cyan).bold();
            let _ = writeln!(output, "{hint_label} {hint}");
        }

        let suggestions = error.suggestions();
        if !suggestions.is_empty() {
            let suggest_label = self.styled("suggestions:", Color::Yellow).bold();
            let _ = writeln!(output, "{suggest_label}");
            for suggestion in suggestions {
                let _ = writeln!(output, "  - {suggestion}");
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, error: &CliError) -> String {
        let json = serde_json::json!({
            "error": {
                "code": error.code(),
                "exit_code": error.exit_status(),
                "message": error.to_string(),
                "hint": error.hint(),
                "suggestions": error.suggestions(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| error.to_string())
    }

    fn format_source_chain(&self, output: &mut String, error: &CliError) {
        use std::error::Error;

        let Some(source) = error.source() else {
            return;
        };

        let caused_label = self.styled("caused by:", Color::BrightBlack);
        let _ = writeln!(output, "{caused_label}");
        let _ = writeln!(output, "  {source}");

        let mut current = source.source();
        let mut depth = 1;
        while let Some(src) = current {
            let _ = writeln!(output, "  {depth}: {src}");
            current = src.source();
            depth += 1;
        }
    }

    fn format_context(&self, output: &mut String, error: &CliError) {
        match error {
            CliError::Io { path: Some(p), .. } => {
                let path_label = self.styled("path:", Color::BrightBlack);
                let _ = writeln!(output, "  {path_label} {}", p.display());
            }
            CliError::Network { url: Some(url), .. } => {
                let url_label = self.styled("url:", Color::BrightBlack);
                let _ = writeln!(output, "  {url_label} {url}");
            }
            CliError::NotFound {
                resource_type,
                resource_name,
                ..
            } => {
                let resource_label = self.styled("resource:", Color::BrightBlack);
                let _ = writeln!(output, "  {resource_label} {resource_type}/{resource_name}");
            }
            CliError::Validation {
                field: Some(field),
                expected,
                actual,
                ..
            } => {
                let field_label = self.styled("field:", Color::BrightBlack);
                let _ = writeln!(output, "  {field_label} {field}");

                if let Some(expected) = expected {
                    let _ = writeln!(output, "  expected: {expected}");
                }
                if let Some(actual) = actual {
                    let _ = writeln!(output, "  actual: {actual}");
                }
            }
            _ => {}
        }
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
