//! mdnote - export markdown notes through an external document converter

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_export, handle_formats},
};
use export::ExportError;

/// Exit code for invalid or incompatible parameters (matches clap usage errors).
pub const EXIT_CONFIGURATION: u8 = 2;

/// Exit code for a missing or failing external tool.
pub const EXIT_EXTERNAL_TOOL: u8 = 3;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    match &cli.command {
        Command::Export(args) => {
            let config = Config::load()?;
            handle_export(args, &config)
        }
        Command::Formats(args) => handle_formats(args),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Maps an error returned by [`run`] to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<domain::ConfigurationError>().is_some() {
        return EXIT_CONFIGURATION;
    }
    if err.downcast_ref::<export::ExternalToolError>().is_some() {
        return EXIT_EXTERNAL_TOOL;
    }
    match err.downcast_ref::<ExportError>() {
        Some(ExportError::Configuration(_)) => EXIT_CONFIGURATION,
        Some(ExportError::ExternalTool(_)) => EXIT_EXTERNAL_TOOL,
        _ => 1,
    }
}
