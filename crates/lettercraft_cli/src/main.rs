//! LetterCraft CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error
//! - 5: Export error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lettercraft_export::ExportError;
use lettercraft_templates::TemplateError;

mod commands;
mod error;

use commands::{Cli, Commands};
use error::CliError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const EXPORT_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so rendered letters on stdout stay clean
    let level = if cli.global.verbose {
        "lettercraft=debug"
    } else if cli.global.quiet {
        "lettercraft=warn"
    } else {
        "lettercraft=info"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(level.parse().expect("static directive"))
                .add_directive("warn".parse().expect("static directive")),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    match run(cli) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Dispatch a parsed command line
fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Templates(args) => commands::templates::execute(&cli.global, args),
        Commands::Variables(args) => commands::variables::execute(&cli.global, args),
        Commands::Render(args) => commands::render::execute(&cli.global, args),
        Commands::Export(args) => commands::export::execute(&cli.global, args),
        Commands::Defaults(args) => commands::defaults::execute(&cli.global, args),
        Commands::Share(args) => commands::share::execute(&cli.global, args),
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.is::<CliError>()) {
        return ExitCodes::INVALID_ARGS;
    }
    if e.chain().any(|cause| cause.is::<ExportError>()) {
        return ExitCodes::EXPORT_ERROR;
    }
    if e.chain().any(|cause| cause.is::<TemplateError>()) {
        return ExitCodes::TEMPLATE_ERROR;
    }

    let msg = e.to_string().to_lowercase();

    if msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("export") {
        ExitCodes::EXPORT_ERROR
    } else if msg.contains("argument") || msg.contains("not found") || msg.contains("unknown") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
