//! Qyri project anchors.
//!
//! A Qyri project is a directory holding an `index.yml` manifest and an
//! `anchor.yml` marker. This crate owns the anchor format, creates new
//! project trees and checks existing directories against the format.

pub mod anchor;
pub mod init;
pub mod manifest;
pub mod templates;
pub mod validate;

pub use anchor::{is_valid_anchor, AnchorError, ProjectAnchor, ANCHOR_FILE, FORMAT_VERSION};
pub use init::{initialize, InitError, InitOptions, Initializer, ProjectLayout};
pub use manifest::{ProjectManifest, DEFAULT_AUTHOR, INITIAL_VERSION, MANIFEST_FILE};
pub use validate::{read_anchor, validate, validate_with_encoding, AnchorRead, AnchorStatus, ValidateError};

pub use wax_common_fs::Encoding;
