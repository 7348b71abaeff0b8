//! `wax verify`: check the anchor in the working directory.

use clap::Parser;
use tracing::debug;
use wax_project::{read_anchor, AnchorRead, AnchorStatus, Encoding};

use super::{anchor_invalid, anchor_missing};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, VerifyOutput};

/// Check whether the current directory holds a valid project anchor
#[derive(Debug, Parser)]
pub struct VerifyCommand {
    /// Text encoding of anchor.yml (utf8, latin1, ascii)
    #[arg(short = 'n', long, default_value = "utf8")]
    pub encoding: String,
}

impl VerifyCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let encoding: Encoding = self.encoding.parse().map_err(|_| {
            CliError::user_with_hint(
                format!("unsupported encoding: {}", self.encoding),
                "Use one of: utf8, latin1, ascii",
            )
        })?;

        let read = read_anchor(&ctx.cwd, encoding)?;
        debug!(?read, "anchor read");

        match (read.status(), &read) {
            (status @ AnchorStatus::Valid { .. }, _) => print_output(ctx, &VerifyOutput::new(status)),
            (AnchorStatus::Missing, _) => Err(anchor_missing(&ctx.cwd)),
            (AnchorStatus::Invalid, AnchorRead::Unparseable(reason)) => {
                Err(anchor_invalid(Some(reason.as_str())))
            }
            (AnchorStatus::Invalid, _) => Err(anchor_invalid(None)),
        }
    }
}
