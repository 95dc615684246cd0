//! Configuration layering for the CLI.
//!
//! The core crate handles file and environment layers; command flags are
//! applied afterwards by each command.

use std::path::Path;

use anyhow::{Context, Result};
use softdir_core::GeneratorConfig;
use tracing::debug;

/// Load settings from `--config` (or `./softdir.toml`) and `SOFTDIR_*` variables.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed, or an
/// environment variable holds an invalid value.
pub fn load_config(explicit: Option<&Path>) -> Result<GeneratorConfig> {
    let base = match explicit {
        Some(path) => GeneratorConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            GeneratorConfig::discover(&cwd)?
        },
    };
    let config = base.with_env()?;
    debug!("Effective config: {config:?}");
    Ok(config)
}
