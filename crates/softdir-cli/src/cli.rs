//! # CLI Structure and Argument Parsing
//!
//! `softdir` turns a download tree into the JSON catalog consumed by the
//! static site, and offers a couple of maintenance commands around it.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Build the catalog with settings from softdir.toml / SOFTDIR_* variables
//! softdir generate
//!
//! # Build from another tree, rewriting legacy-encoded readmes on the way
//! softdir generate --source /srv/down --output dist/software.json --normalize
//!
//! # Preview which metadata files are not UTF-8
//! softdir normalize --dry-run
//!
//! # Inspect one entry of a generated catalog
//! softdir show "Visual Studio Code" --lang en --format json
//! ```
//!
//! ## Output Formats
//!
//! `show` and `normalize` support:
//!
//! - **text**: Human-readable formatted output (default)
//! - **json**: Machine-readable JSON for scripting

use clap::{Parser, Subcommand};
use softdir_core::Language;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `softdir` command
///
/// # Global Options
///
/// - `--verbose`: Enable debug logging
/// - `--quiet`: Only log errors
/// - `--no-color`: Disable ANSI colors
/// - `--config`: Use an explicit configuration file
#[derive(Parser, Clone, Debug)]
#[command(name = "softdir")]
#[command(version)]
#[command(about = "softdir - Build the software catalog for a static download site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides `./softdir.toml`). Also via `SOFTDIR_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "SOFTDIR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `softdir` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Scan the download tree and write the catalog
    Generate {
        /// Root of the download tree
        #[arg(long, short = 's', value_name = "DIR")]
        source: Option<PathBuf>,
        /// Where to write the catalog JSON
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
        /// Rewrite legacy-encoded metadata files as UTF-8 while scanning
        #[arg(long)]
        normalize: bool,
    },

    /// Rewrite non-UTF-8 metadata files in the download tree as UTF-8
    Normalize {
        /// Root of the download tree
        #[arg(long, short = 's', value_name = "DIR")]
        source: Option<PathBuf>,
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one software entry from a generated catalog
    Show {
        /// Software name as it appears in the catalog
        name: String,
        /// Catalog to read (defaults to the configured output)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Preferred description language (`zh-CN` or `en`)
        #[arg(long, default_value_t = Language::DEFAULT)]
        lang: Language,
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Commands {
    /// Output format requested by the command, if it prints structured data.
    #[must_use]
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Generate { .. } => None,
            Self::Normalize { format, .. } | Self::Show { format, .. } => Some(*format),
        }
    }
}
