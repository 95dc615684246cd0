//! Generate command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use softdir_core::{GeneratorConfig, Scanner};
use tracing::info;

/// Scan the configured download tree and write the catalog.
pub fn execute(config: &GeneratorConfig, quiet: bool) -> Result<()> {
    info!("Scanning {}", config.source_dir.display());
    let catalog = Scanner::new(config.scan_options())
        .scan(&config.source_dir)
        .with_context(|| format!("Failed to scan {}", config.source_dir.display()))?;

    catalog.write_to(&config.output)?;

    if !quiet {
        println!(
            "{} Generated {} software → {}",
            "✓".green(),
            catalog.software.len().to_string().bold(),
            config.output.display()
        );
    }
    Ok(())
}
