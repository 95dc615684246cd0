//! Walks a download tree and assembles the [`Catalog`].
//!
//! The tree has exactly two levels:
//!
//! ```text
//! down/
//! ├── 7-Zip/                 software
//! │   ├── readme.md          software-level description
//! │   ├── tags.txt
//! │   ├── 24.08/             version with direct downloads
//! │   │   └── 7z2408-x64.exe
//! │   └── 9.20/
//! │       └── link.txt       version served over P2P
//! └── Chrome/
//!     └── official.txt       no versions: becomes a single "latest" entry
//! ```
//!
//! Version-level descriptions override software-level ones per language; the
//! legacy description falls back to the software's as a whole.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Download, Software, Version};
use crate::localization::LocalizedDescription;
use crate::metadata::{DirectoryEntries, Metadata, MetadataReader};
use crate::version_order::sort_descending;
use crate::Result;

/// Label of the version synthesized for software without version folders.
pub const LATEST_LABEL: &str = "latest";

/// Options controlling a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Sort software by name instead of keeping directory-listing order.
    pub sort_resources: bool,
    /// Rewrite legacy-encoded metadata files as UTF-8 while reading them.
    pub normalize_encoding: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            sort_resources: true,
            normalize_encoding: false,
        }
    }
}

/// Builds a catalog from a download tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    options: ScanOptions,
    reader: MetadataReader,
}

impl Scanner {
    /// Create a scanner with the given options.
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self {
            options,
            reader: MetadataReader::new(options.normalize_encoding),
        }
    }

    /// Scan `root` into a fresh catalog.
    ///
    /// A missing root yields an empty catalog: nothing has been published yet.
    /// Software or version directories that cannot be listed are skipped with
    /// a warning.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `root` exists but cannot be listed.
    pub fn scan(&self, root: &Path) -> Result<Catalog> {
        if !root.exists() {
            info!("{} does not exist, generating an empty catalog", root.display());
            return Ok(Catalog::empty());
        }

        let root_entries = DirectoryEntries::read(root)?;
        let mut names = root_entries.subdirs().to_vec();
        if self.options.sort_resources {
            names.sort();
        }

        let software = names
            .iter()
            .filter_map(|name| self.scan_software(root, name))
            .collect();

        Ok(Catalog::new(software))
    }

    fn scan_software(&self, root: &Path, name: &str) -> Option<Software> {
        let dir = root.join(name);
        let entries = match DirectoryEntries::read(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping {}: {e}", dir.display());
                return None;
            },
        };
        let metadata = self.reader.read_metadata(&entries);

        let mut labels = entries.subdirs().to_vec();
        sort_descending(&mut labels);

        let versions: Vec<Version> = if labels.is_empty() {
            self.reader
                .official_link(&entries)
                .map(|official_link| {
                    inherit(
                        LATEST_LABEL.to_owned(),
                        &Metadata::default(),
                        &metadata,
                        Download::Official { official_link },
                    )
                })
                .into_iter()
                .collect()
        } else {
            labels
                .into_iter()
                .filter_map(|label| self.scan_version(&dir, label, &metadata))
                .collect()
        };

        if versions.is_empty() {
            debug!("Skipping {name}: no versions");
            return None;
        }

        debug!("{name}: {} version(s)", versions.len());
        Some(Software {
            name: name.to_owned(),
            description: metadata.description,
            descriptions: metadata.descriptions,
            tags: metadata.tags,
            versions,
        })
    }

    fn scan_version(&self, software_dir: &Path, label: String, software: &Metadata) -> Option<Version> {
        let dir = software_dir.join(&label);
        let entries = match DirectoryEntries::read(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping {}: {e}", dir.display());
                return None;
            },
        };

        let own = self.reader.read_metadata(&entries);
        let download = self.reader.read_download(&entries);
        Some(inherit(label, &own, software, download))
    }
}

/// Build a version whose descriptions fall back to the software's.
fn inherit(label: String, own: &Metadata, software: &Metadata, download: Download) -> Version {
    Version {
        version: label,
        description: own
            .description
            .clone()
            .or_else(|| software.description.clone()),
        descriptions: LocalizedDescription::overlay(
            own.descriptions.as_ref(),
            software.descriptions.as_ref(),
        ),
        download,
    }
}

/// Scan `root` with default options.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan(root: &Path) -> Result<Catalog> {
    Scanner::default().scan(root)
}
