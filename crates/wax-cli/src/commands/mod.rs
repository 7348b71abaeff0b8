//! Command implementations.

mod new;
mod upload;
mod verify;

pub use new::NewCommand;
pub use upload::UploadCommand;
pub use verify::VerifyCommand;

use std::path::Path;

use wax_project::validate::has_misnamed_anchor;
use wax_project::ANCHOR_FILE;

use crate::error::CliError;

/// Error for a directory without `anchor.yml`.
pub(crate) fn anchor_missing(dir: &Path) -> CliError {
    let err = CliError::not_found("file", ANCHOR_FILE, "could not find anchor.yml in this directory")
        .with_hint("Try changing anchor.yaml to anchor.yml.");
    if has_misnamed_anchor(dir) {
        err.with_suggestion("anchor.yaml exists here; rename it to anchor.yml")
    } else {
        err
    }
}

/// Error for an anchor that exists but does not validate.
pub(crate) fn anchor_invalid(reason: Option<&str>) -> CliError {
    let hint = "The anchor must hold the format version \"00\" and an ignore flag; recreate it with `wax new` if unsure";
    let err = CliError::validation("anchor.yml is not a valid anchor");
    match reason {
        Some(reason) => err.with_hint(format!("{reason}. {hint}")),
        None => err.with_hint(hint),
    }
}
