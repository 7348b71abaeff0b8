//! Text encodings accepted when reading project files.

use std::fmt;
use std::str::FromStr;

use crate::FsError;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Supported text encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Encoding {
    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
        }
    }

    /// Decode raw bytes. A leading UTF-8 byte order mark is dropped.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        match self {
            Self::Utf8 => {
                let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(body.to_vec()).map_err(|e| e.to_string())
            }
            // Every byte maps to the code point of the same value.
            Self::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(format!(
                    "non-ASCII byte 0x{:02X} at offset {offset}",
                    bytes[offset]
                )),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
        }
    }
}

impl FromStr for Encoding {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "binary" => Ok(Self::Latin1),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            _ => Err(FsError::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
