//! softdir CLI - Build the software catalog for a static download site
//!
//! The binary in `main.rs` is a thin wrapper around [`run`], which parses
//! arguments, sets up logging and dispatches to one of the commands.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use crate::cli::{Cli, Commands};
use crate::utils::{initialize_logging, load_config};

/// Execute the softdir CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            source,
            output,
            normalize,
        } => {
            if let Some(source) = source {
                config.source_dir = source;
            }
            if let Some(output) = output {
                config.output = output;
            }
            config.normalize_encoding |= normalize;
            commands::generate_catalog(&config, cli.quiet)
        },
        Commands::Normalize {
            source,
            dry_run,
            format,
        } => {
            let source = source.unwrap_or(config.source_dir);
            commands::normalize_tree(&source, dry_run, format, cli.quiet)
        },
        Commands::Show {
            name,
            catalog,
            lang,
            format,
        } => {
            let catalog = catalog.unwrap_or(config.output);
            commands::show_software(&catalog, &name, lang, &config.download_base, format)
        },
    }
}
