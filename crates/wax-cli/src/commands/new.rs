//! `wax new`: scaffold a project directory.

use clap::Parser;
use tracing::info;
use wax_common_config::Environment;
use wax_project::{InitOptions, Initializer};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, NewOutput};

/// Create a new Qyri project
#[derive(Debug, Parser)]
pub struct NewCommand {
    /// Project name, also used as the directory name
    pub name: String,

    /// Project authors; the first is the primary author
    #[arg(value_name = "AUTHOR")]
    pub authors: Vec<String>,

    /// Create a library instead of an application
    #[arg(short, long)]
    pub lib: bool,

    /// Production layout: metadata only, no source tree
    #[arg(short, long)]
    pub prod: bool,
}

impl NewCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let username = Environment::username();
        let options = InitOptions {
            as_library: self.lib,
            production: self.prod,
        };

        let layout = Initializer::new(&ctx.cwd, username)
            .with_source_extension(ctx.config.scaffold.source_extension.as_str())
            .initialize(&self.name, &self.authors, options)?;

        info!(root = %layout.root.display(), "project created");

        let output = NewOutput {
            name: self.name.clone(),
            root: layout.root.display().to_string(),
            kind: if self.lib { "library" } else { "application" },
            created: layout.relative_paths(),
        };
        print_output(ctx, &output)
    }
}
