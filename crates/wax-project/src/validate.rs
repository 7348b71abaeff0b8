//! Anchor validation.
//!
//! Reading is a single synchronous read-and-parse with no side effects, so
//! validating the same unchanged directory twice gives the same answer.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use wax_common_fs::{self as wfs, Encoding, FsError};

use crate::anchor::{ProjectAnchor, ANCHOR_FILE, MISNAMED_ANCHOR_FILE};

/// Outcome of validating a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnchorStatus {
    /// Anchor parses and uses the supported format version.
    Valid { ignored: bool },
    /// Anchor exists but is malformed or uses another format version.
    Invalid,
    /// No `anchor.yml` in the directory.
    Missing,
}

impl AnchorStatus {
    /// Valid and not ignored.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Valid { ignored: false })
    }
}

/// Validation errors other than a missing or invalid anchor.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to read anchor: {0}")]
    Io(#[source] FsError),
}

/// What was found at `<dir>/anchor.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorRead {
    Missing,
    /// Present but unreadable as an anchor; carries the reason.
    Unparseable(String),
    Parsed(ProjectAnchor),
}

impl AnchorRead {
    /// Collapse to the three-way status.
    pub fn status(&self) -> AnchorStatus {
        match self {
            Self::Missing => AnchorStatus::Missing,
            Self::Unparseable(_) => AnchorStatus::Invalid,
            Self::Parsed(anchor) if anchor.is_valid() => AnchorStatus::Valid {
                ignored: anchor.ignore,
            },
            Self::Parsed(_) => AnchorStatus::Invalid,
        }
    }
}

/// Path of the anchor inside `dir`.
pub fn anchor_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(ANCHOR_FILE)
}

/// Whether `dir` has an `anchor.yaml` that was probably meant to be `anchor.yml`.
pub fn has_misnamed_anchor(dir: impl AsRef<Path>) -> bool {
    dir.as_ref().join(MISNAMED_ANCHOR_FILE).is_file()
}

/// Read and parse the anchor in `dir`.
///
/// Only a missing file maps to [`AnchorRead::Missing`]; permission and other
/// I/O faults are returned as errors. Bytes that do not decode under
/// `encoding` count as an unparseable anchor.
pub fn read_anchor(dir: impl AsRef<Path>, encoding: Encoding) -> Result<AnchorRead, ValidateError> {
    let path = anchor_path(dir);

    let text = match wfs::read_with_encoding(&path, encoding) {
        Ok(text) => text,
        Err(FsError::NotFound { .. }) => {
            debug!(path = %path.display(), "anchor not found");
            return Ok(AnchorRead::Missing);
        }
        Err(e @ FsError::Decode { .. }) => return Ok(AnchorRead::Unparseable(e.to_string())),
        Err(e) => return Err(ValidateError::Io(e)),
    };

    match ProjectAnchor::parse(&text) {
        Ok(anchor) => {
            if !anchor.is_valid() {
                debug!(
                    path = %path.display(),
                    version = %anchor.format_version,
                    "unsupported anchor format version"
                );
            }
            Ok(AnchorRead::Parsed(anchor))
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "anchor did not parse");
            Ok(AnchorRead::Unparseable(e.to_string()))
        }
    }
}

/// Validate the UTF-8 anchor in `dir`.
pub fn validate(dir: impl AsRef<Path>) -> Result<AnchorStatus, ValidateError> {
    validate_with_encoding(dir, Encoding::Utf8)
}

/// Validate the anchor in `dir`, decoding it with `encoding`.
pub fn validate_with_encoding(
    dir: impl AsRef<Path>,
    encoding: Encoding,
) -> Result<AnchorStatus, ValidateError> {
    read_anchor(dir, encoding).map(|read| read.status())
}
