//! Show command implementation

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use softdir_core::{Catalog, DownloadTarget, Error, Language, Software, download_targets};

use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SoftwareView<'a> {
    name: &'a str,
    language: Language,
    description: Option<&'a str>,
    tags: &'a [String],
    versions: Vec<VersionView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionView<'a> {
    version: &'a str,
    description: Option<&'a str>,
    download_type: &'static str,
    targets: Vec<TargetView>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TargetView {
    File { name: String, path: String },
    P2p { link: String },
    Official { link: String },
}

impl From<DownloadTarget> for TargetView {
    fn from(target: DownloadTarget) -> Self {
        match target {
            DownloadTarget::File { name, path } => Self::File { name, path },
            DownloadTarget::P2p(link) => Self::P2p { link },
            DownloadTarget::Official(link) => Self::Official { link },
        }
    }
}

/// Print one software entry of the catalog at `catalog_path`.
pub fn execute(
    catalog_path: &Path,
    name: &str,
    language: Language,
    download_base: &str,
    format: OutputFormat,
) -> Result<()> {
    let catalog = Catalog::read_from(catalog_path)?;
    let software = catalog
        .find(name)
        .ok_or_else(|| Error::NotFound(format!("software '{name}' is not in the catalog")))?;

    let view = build_view(software, language, download_base)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print_text(&view),
    }
    Ok(())
}

fn build_view<'a>(
    software: &'a Software,
    language: Language,
    download_base: &str,
) -> Result<SoftwareView<'a>> {
    let versions = software
        .versions
        .iter()
        .map(|version| {
            let targets = download_targets(download_base, software, version)?
                .into_iter()
                .map(TargetView::from)
                .collect();
            Ok(VersionView {
                version: &version.version,
                description: version.description_for(language),
                download_type: version.download.kind(),
                targets,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SoftwareView {
        name: &software.name,
        language,
        description: software.description_for(language),
        tags: software.tags.as_deref().unwrap_or_default(),
        versions,
    })
}

fn print_text(view: &SoftwareView<'_>) {
    println!("{}", view.name.bold());
    if let Some(description) = view.description {
        println!("{description}");
    }
    if !view.tags.is_empty() {
        println!("{} {}", "Tags:".dimmed(), view.tags.join(", "));
    }

    for version in &view.versions {
        println!();
        println!(
            "{} {}",
            version.version.cyan().bold(),
            format!("[{}]", version.download_type).dimmed()
        );
        // Inherited descriptions would only repeat the header
        if let Some(description) = version.description.filter(|d| Some(*d) != view.description) {
            println!("  {description}");
        }
        for target in &version.targets {
            match target {
                TargetView::File { name, path } => println!("  {name}  {}", path.blue()),
                TargetView::P2p { link } => println!("  P2P  {}", link.blue()),
                TargetView::Official { link } => println!("  Official  {}", link.blue()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use softdir_core::{Download, LocalizedDescription, Version};

    fn software() -> Software {
        Software {
            name: "Foo Bar".into(),
            description: Some("默认".into()),
            descriptions: LocalizedDescription::new(Some("默认".into()), Some("Default".into())),
            tags: Some(vec!["tools".into()]),
            versions: vec![Version {
                version: "1.0".into(),
                description: Some("默认".into()),
                descriptions: None,
                download: Download::Direct {
                    files: vec!["setup #1.exe".into()],
                },
            }],
        }
    }

    #[test]
    fn test_view_uses_requested_language_and_encoded_paths() {
        let software = software();
        let view = build_view(&software, Language::En, "down").unwrap();
        assert_eq!(view.description, Some("Default"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["versions"][0]["downloadType"], "direct");
        assert_eq!(json["versions"][0]["targets"][0]["kind"], "file");
        assert_eq!(
            json["versions"][0]["targets"][0]["path"],
            "down/Foo%20Bar/1.0/setup%20%231.exe"
        );
    }
}
