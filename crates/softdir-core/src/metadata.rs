//! Reading the descriptive files that live next to downloads.
//!
//! Every software and version directory may carry:
//!
//! | File | Meaning |
//! |---|---|
//! | `readme.md` | legacy description; Chinese text unless `readme.zh-CN.md` exists |
//! | `readme.zh-CN.md` | Chinese description |
//! | `readme.en.md` | English description |
//! | `tags.txt` | one tag per line |
//! | `link.txt` | P2P link (magnet, ed2k, ...) |
//! | `official.txt` | official download page URL |
//!
//! File names are matched case-insensitively. All text goes through
//! [`crate::encoding`], so legacy GBK/Big5 files are read correctly.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::Download;
use crate::encoding::{persist_as_utf8, read_text};
use crate::localization::{Language, LocalizedDescription};
use crate::Result;

/// Unsuffixed description file.
pub const README_FILE: &str = "readme.md";
/// Description file for `zh-CN`.
pub const README_ZH_CN_FILE: &str = "readme.zh-CN.md";
/// Description file for `en`.
pub const README_EN_FILE: &str = "readme.en.md";
/// Newline-delimited tag list.
pub const TAGS_FILE: &str = "tags.txt";
/// Marker holding a P2P link.
pub const P2P_LINK_FILE: &str = "link.txt";
/// Marker holding an official download URL.
pub const OFFICIAL_LINK_FILE: &str = "official.txt";

/// Written by Notepad and friends at the start of UTF-8 files.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Every file name that describes a directory rather than being a download.
pub const METADATA_FILES: &[&str] = &[
    README_FILE,
    README_ZH_CN_FILE,
    README_EN_FILE,
    TAGS_FILE,
    P2P_LINK_FILE,
    OFFICIAL_LINK_FILE,
];

/// Name of the localized readme for `language`.
#[must_use]
pub const fn readme_for(language: Language) -> &'static str {
    match language {
        Language::ZhCn => README_ZH_CN_FILE,
        Language::En => README_EN_FILE,
    }
}

/// Whether `name` is one of [`METADATA_FILES`], ignoring case.
#[must_use]
pub fn is_metadata_file(name: &str) -> bool {
    METADATA_FILES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A single-level listing of a directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntries {
    path: PathBuf,
    files: Vec<String>,
    subdirs: Vec<String>,
}

impl DirectoryEntries {
    /// List the regular files and subdirectories directly inside `path`.
    ///
    /// Entries whose names are not valid Unicode are skipped with a warning,
    /// since they cannot be represented in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                warn!("Skipping non-UTF-8 entry {}", entry_path.display());
                continue;
            };

            if entry_path.is_dir() {
                subdirs.push(name);
            } else if entry_path.is_file() {
                files.push(name);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            files,
            subdirs,
        })
    }

    /// The directory that was listed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the subdirectories, in listing order.
    #[must_use]
    pub fn subdirs(&self) -> &[String] {
        &self.subdirs
    }

    /// Names of the regular files, in listing order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Path of the file called `name`, ignoring case.
    ///
    /// An exact-case match is preferred when several files differ only in case.
    #[must_use]
    pub fn find_file(&self, name: &str) -> Option<PathBuf> {
        self.files
            .iter()
            .find(|f| f.as_str() == name)
            .or_else(|| self.files.iter().find(|f| f.eq_ignore_ascii_case(name)))
            .map(|f| self.path.join(f))
    }

    /// Files that are downloads, i.e. not metadata, sorted by name.
    #[must_use]
    pub fn download_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .files
            .iter()
            .filter(|f| !is_metadata_file(f))
            .cloned()
            .collect();
        files.sort();
        files
    }
}

/// Descriptive fields read from one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Content of the unsuffixed readme.
    pub description: Option<String>,
    /// Per-language descriptions.
    pub descriptions: Option<LocalizedDescription>,
    /// Tags, in file order.
    pub tags: Option<Vec<String>>,
}

/// Reads metadata files, optionally rewriting legacy encodings as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataReader {
    normalize_encoding: bool,
}

impl MetadataReader {
    /// Create a reader. With `normalize_encoding`, every non-UTF-8 text file
    /// that decodes cleanly is rewritten as UTF-8 after it is read.
    #[must_use]
    pub const fn new(normalize_encoding: bool) -> Self {
        Self { normalize_encoding }
    }

    /// Read descriptions and tags from a directory listing.
    #[must_use]
    pub fn read_metadata(&self, entries: &DirectoryEntries) -> Metadata {
        let description = self.read_named(entries, README_FILE);
        // The unsuffixed readme stands in for the default language only.
        let zh_cn = self
            .read_named(entries, readme_for(Language::DEFAULT))
            .or_else(|| description.clone());
        let en = self.read_named(entries, readme_for(Language::En));

        let tags = self.read_named(entries, TAGS_FILE).and_then(|text| {
            let tags: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect();
            (!tags.is_empty()).then_some(tags)
        });

        Metadata {
            description,
            descriptions: LocalizedDescription::new(zh_cn, en),
            tags,
        }
    }

    /// Link from the official marker, if present and non-empty.
    #[must_use]
    pub fn official_link(&self, entries: &DirectoryEntries) -> Option<String> {
        self.read_link(entries, OFFICIAL_LINK_FILE)
    }

    /// Link from the P2P marker, if present and non-empty.
    #[must_use]
    pub fn p2p_link(&self, entries: &DirectoryEntries) -> Option<String> {
        self.read_link(entries, P2P_LINK_FILE)
    }

    /// Resolve how a version is downloaded: official, then P2P, then direct files.
    #[must_use]
    pub fn read_download(&self, entries: &DirectoryEntries) -> Download {
        if let Some(official_link) = self.official_link(entries) {
            return Download::Official { official_link };
        }
        if let Some(p2p_link) = self.p2p_link(entries) {
            return Download::P2p { p2p_link };
        }
        Download::Direct {
            files: entries.download_files(),
        }
    }

    fn read_link(&self, entries: &DirectoryEntries, name: &str) -> Option<String> {
        let path = entries.find_file(name)?;
        let text = self.decode_file(&path)?;
        let link = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_owned);
        if link.is_none() {
            warn!("{} is empty, ignoring it", path.display());
        }
        link
    }

    fn read_named(&self, entries: &DirectoryEntries, name: &str) -> Option<String> {
        entries
            .find_file(name)
            .and_then(|path| self.read_text_file(&path))
    }

    /// Decode a text file; whitespace-only content counts as absent.
    fn read_text_file(&self, path: &Path) -> Option<String> {
        self.decode_file(path)
            .filter(|text| !text.trim().is_empty())
    }

    /// Decode a text file without its byte order mark. `None` only when the
    /// file could not be read.
    fn decode_file(&self, path: &Path) -> Option<String> {
        let decoded = match read_text(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                return None;
            },
        };

        if self.normalize_encoding {
            match persist_as_utf8(path, &decoded) {
                Ok(true) => debug!(
                    "Rewrote {} from {} to UTF-8",
                    path.display(),
                    decoded.encoding.name()
                ),
                Ok(false) => {},
                Err(e) => warn!("{e}"),
            }
        }

        match decoded.text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => Some(rest.to_owned()),
            None => Some(decoded.text),
        }
    }
}
