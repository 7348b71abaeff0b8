//! Minimal ANSI styling for terminal output.

use std::fmt;

use clap::ColorChoice;

/// When to emit ANSI escapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the stream is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve the mode for a stream.
    pub fn enabled_for(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Cyan,
    BrightBlack,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Yellow => "33",
            Self::Cyan => "36",
            Self::BrightBlack => "90",
        }
    }
}

/// Text with optional styling, rendered through `Display`.
#[derive(Debug, Clone)]
pub struct Styled {
    text: String,
    enabled: bool,
    fg: Option<Color>,
    bold: bool,
}

impl Styled {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: false,
            fg: None,
            bold: false,
        }
    }

    /// Enable styling when `mode` allows it for a terminal stream.
    pub fn with_color_mode(mut self, mode: ColorMode, is_terminal: bool) -> Self {
        self.enabled = mode.enabled_for(is_terminal);
        self
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl fmt::Display for Styled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled || (self.fg.is_none() && !self.bold) {
            return f.write_str(&self.text);
        }
        let mut codes = Vec::with_capacity(2);
        if self.bold {
            codes.push("1");
        }
        if let Some(color) = self.fg {
            codes.push(color.code());
        }
        write!(f, "\x1b[{}m{}\x1b[0m", codes.join(";"), self.text)
    }
}
