//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs always go to stderr so that JSON written to stdout stays parseable.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = cli.command.format().is_some_and(|f| f.is_machine());

    let level = log_level(cli);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(!(cli.no_color || no_color_env()))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    if cli.no_color || no_color_env() || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

/// DEBUG with `-v`, ERROR with `-q`. Otherwise INFO while generating or
/// normalizing with text output, WARN everywhere else.
fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        return Level::DEBUG;
    }
    if cli.quiet {
        return Level::ERROR;
    }
    match &cli.command {
        Commands::Generate { .. } => Level::INFO,
        Commands::Normalize { format, .. } if !format.is_machine() => Level::INFO,
        Commands::Normalize { .. } | Commands::Show { .. } => Level::WARN,
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}
