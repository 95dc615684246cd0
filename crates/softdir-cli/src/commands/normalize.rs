//! Normalize command implementation

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use softdir_core::{NormalizeAction, NormalizedFile};

use crate::output::OutputFormat;

/// Rewrite non-UTF-8 metadata files under `source` and print a report.
pub fn execute(source: &Path, dry_run: bool, format: OutputFormat, quiet: bool) -> Result<()> {
    let report = softdir_core::normalize_tree(source, dry_run)
        .with_context(|| format!("Failed to walk {}", source.display()))?;

    match format {
        OutputFormat::Json => {
            let files: Vec<_> = report.iter().map(to_json).collect();
            println!("{}", serde_json::to_string_pretty(&files)?);
        },
        OutputFormat::Text => print_text(&report, dry_run, quiet),
    }
    Ok(())
}

const fn action_name(action: &NormalizeAction) -> &'static str {
    match action {
        NormalizeAction::Rewritten => "rewritten",
        NormalizeAction::WouldRewrite => "would_rewrite",
        NormalizeAction::SkippedLossy => "skipped_lossy",
        NormalizeAction::Failed(_) => "failed",
    }
}

fn to_json(file: &NormalizedFile) -> serde_json::Value {
    let mut value = json!({
        "path": file.path.display().to_string(),
        "encoding": file.encoding.name(),
        "action": action_name(&file.action),
    });
    if let NormalizeAction::Failed(reason) = &file.action {
        value["error"] = json!(reason);
    }
    value
}

fn print_text(report: &[NormalizedFile], dry_run: bool, quiet: bool) {
    if report.is_empty() {
        if !quiet {
            println!("All metadata files are already UTF-8");
        }
        return;
    }

    for file in report {
        let path = file.path.display();
        let encoding = file.encoding.name();
        match &file.action {
            NormalizeAction::Rewritten => {
                println!("{} {path} ({encoding} → UTF-8)", "✓".green());
            },
            NormalizeAction::WouldRewrite => {
                println!("{} {path} ({encoding} → UTF-8)", "~".yellow());
            },
            NormalizeAction::SkippedLossy => {
                println!("{} {path} (unknown encoding, left untouched)", "!".yellow());
            },
            NormalizeAction::Failed(reason) => {
                println!("{} {path}: {reason}", "✗".red());
            },
        }
    }

    if !quiet {
        let changed = report
            .iter()
            .filter(|f| matches!(f.action, NormalizeAction::Rewritten | NormalizeAction::WouldRewrite))
            .count();
        let verb = if dry_run { "would be converted" } else { "converted" };
        println!("{changed} of {} non-UTF-8 files {verb}", report.len());
    }
}
