//! `wax upload`: send a verified project to the registry.

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use wax_common_config::{registry_token, WaxConfig};
use wax_project::{read_anchor, AnchorRead, Encoding, ProjectAnchor};
use wax_registry::{HttpRegistry, PackageBundle, Registry, UploadReceipt};

use super::{anchor_invalid, anchor_missing};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, UploadOutput};

/// Upload the project in the current directory
#[derive(Debug, Parser)]
pub struct UploadCommand {
    /// Package name; must match the project name in anchor.yml
    pub name: String,
}

impl UploadCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        ctx.progress("Verifying project...");
        let anchor = active_anchor(&ctx.cwd, &self.name)?;

        let registry = http_registry(&ctx.config)?;

        ctx.progress("Uploading...");
        let receipt = publish(
            &registry,
            &anchor,
            &ctx.cwd,
            ctx.config.registry.max_file_bytes,
        )
        .await?;

        print_output(ctx, &UploadOutput { receipt })
    }
}

/// The anchor in `dir`, if it is valid, active and named `name`.
fn active_anchor(dir: &Path, name: &str) -> Result<ProjectAnchor, CliError> {
    let anchor = match read_anchor(dir, Encoding::Utf8)? {
        AnchorRead::Missing => return Err(anchor_missing(dir)),
        AnchorRead::Unparseable(reason) => return Err(anchor_invalid(Some(reason.as_str()))),
        AnchorRead::Parsed(anchor) if !anchor.is_valid() => return Err(anchor_invalid(None)),
        AnchorRead::Parsed(anchor) => anchor,
    };

    if anchor.ignore {
        return Err(CliError::user_with_hint(
            "No Qyri project found.",
            "Replace 'true' with 'false' after ignore in anchor.yml to activate your package.",
        ));
    }

    if anchor.project_name != name {
        return Err(CliError::field_mismatch(
            format!("package name {name:?} does not match this project"),
            "name",
            anchor.project_name,
            name,
        ));
    }

    Ok(anchor)
}

fn http_registry(config: &WaxConfig) -> Result<HttpRegistry, CliError> {
    let registry = &config.registry;
    let endpoint = registry.endpoint.as_deref().ok_or_else(|| {
        CliError::config_with_hint(
            "no registry endpoint configured",
            "Set registry.endpoint in .wax/config.yaml",
        )
    })?;

    let token = registry_token(config).map_err(|e| {
        CliError::config_with_hint(
            e.to_string(),
            "Set registry.token in .wax/config.yaml or export WAX_REGISTRY_TOKEN",
        )
    })?;

    Ok(HttpRegistry::new(
        endpoint,
        token,
        Duration::from_secs(registry.timeout_secs),
    )?)
}

/// Bundle the project and hand it to `registry`.
async fn publish(
    registry: &dyn Registry,
    anchor: &ProjectAnchor,
    root: &Path,
    max_file_bytes: u64,
) -> Result<UploadReceipt, CliError> {
    let bundle = PackageBundle::collect(&anchor.project_name, root, max_file_bytes)?;
    info!(
        package = %bundle.name,
        files = bundle.files.len(),
        bytes = bundle.total_bytes(),
        "bundle ready"
    );
    Ok(registry.upload(&bundle).await?)
}
