//! Turning a finished command into process output and an exit code.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic;
use std::process::ExitCode;

use crate::cli::OutputFormat;
use crate::error::{CliError, ErrorFormatter};
use crate::output::color::ColorMode;

/// Replace the default panic message with one that points at wax.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();

        eprintln!("wax crashed{location}: {}", payload_text(info.payload()));
        eprintln!("This is a bug in wax, not in your project.");
        if std::env::var_os("RUST_BACKTRACE").is_some() {
            eprintln!("{}", Backtrace::force_capture());
        } else {
            eprintln!("Rerun with RUST_BACKTRACE=1 for a backtrace.");
        }
    }));
}

fn payload_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Print the error of a failed command on stderr and pick the exit code.
pub fn finish<T>(
    result: Result<T, CliError>,
    format: OutputFormat,
    color_mode: ColorMode,
    verbose: bool,
) -> ExitCode {
    let Err(error) = result else {
        return ExitCode::SUCCESS;
    };

    tracing::debug!(code = error.code(), status = error.exit_status(), "command failed");
    let formatter = ErrorFormatter::new().color_mode(color_mode).verbose(verbose);
    match format {
        OutputFormat::Json => eprintln!("{}", formatter.format_json(&error)),
        OutputFormat::Text => formatter.print(&error),
    }
    error.exit_code()
}
