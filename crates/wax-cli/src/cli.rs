//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};
use wax_common_config::{ConfigLoader, WaxConfig};

use crate::commands::{NewCommand, UploadCommand, VerifyCommand};
use crate::error::CliError;

/// Wax - project tooling for the Qyri package manager
///
/// Scaffold, verify and upload Qyri projects.
#[derive(Debug, Parser)]
#[command(
    name = "wax",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    help_template = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "WAX_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// When to use colors
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "When to use terminal colors"
    )]
    pub color: ColorChoice,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new Qyri project in a new directory
    New(NewCommand),

    /// Check the anchor of the project in the current directory
    Verify(VerifyCommand),

    /// Upload the project in the current directory to the registry
    Upload(UploadCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration from `--config` or `.wax/config.yaml`.
    pub fn load_config(&self) -> Result<WaxConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new(current_dir()?),
        };
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub async fn execute(self, config: WaxConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
            quiet: self.quiet,
            cwd: current_dir()?,
        };

        match self.command {
            Command::New(cmd) => cmd.execute(&ctx).await,
            Command::Verify(cmd) => cmd.execute(&ctx).await,
            Command::Upload(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(&ctx),
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

fn current_dir() -> Result<PathBuf, CliError> {
    std::env::current_dir().map_err(|e| CliError::io("cannot determine the working directory", e))
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: WaxConfig,
    pub format: OutputFormat,
    pub quiet: bool,
    /// Directory the command operates on.
    pub cwd: PathBuf,
}

impl CommandContext {
    /// Progress line on stderr, suppressed by `--quiet` and JSON output.
    pub fn progress(&self, message: &str) {
        if !self.quiet && self.format == OutputFormat::Text {
            eprintln!("{message}");
        }
    }
}
