//! Catalog data model and its JSON document form.
//!
//! The generated document is consumed as-is by the static front end:
//!
//! ```json
//! {
//!   "software": [
//!     {
//!       "name": "7-Zip",
//!       "descriptions": { "zh-CN": "...", "en": "..." },
//!       "tags": ["compression"],
//!       "versions": [
//!         { "version": "24.08", "downloadType": "direct", "files": ["7z2408-x64.exe"] },
//!         { "version": "9.20", "downloadType": "p2p", "p2pLink": "magnet:?xt=..." }
//!       ]
//!     }
//!   ],
//!   "generatedAt": "2026-10-18T08:30:00.000Z"
//! }
//! ```
//!
//! Absent optional fields are omitted rather than written as `null`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::localization::{self, Language, LocalizedDescription};
use crate::{Error, Result};

/// How a version is obtained. Exactly one mechanism per version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "downloadType", rename_all = "lowercase")]
pub enum Download {
    /// Files stored next to the catalog, served from the static site.
    Direct {
        /// File names inside the version directory.
        files: Vec<String>,
    },
    /// A peer-to-peer link such as a magnet or ed2k URI.
    P2p {
        /// The link, copied verbatim from the marker file.
        #[serde(rename = "p2pLink")]
        p2p_link: String,
    },
    /// A redirect to the vendor's own download page.
    Official {
        /// URL of the official download page.
        #[serde(rename = "officialLink")]
        official_link: String,
    },
}

impl Download {
    /// The `downloadType` value written to JSON.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "direct",
            Self::P2p { .. } => "p2p",
            Self::Official { .. } => "official",
        }
    }
}

/// One release of a software package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Version label, taken from the directory name.
    pub version: String,
    /// Legacy single-language description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-language descriptions, already merged with the software's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<LocalizedDescription>,
    /// Download mechanism.
    #[serde(flatten)]
    pub download: Download,
}

impl Version {
    /// Description to display for `language`, with the standard fallbacks.
    #[must_use]
    pub fn description_for(&self, language: Language) -> Option<&str> {
        localization::resolve(
            self.descriptions.as_ref(),
            self.description.as_deref(),
            language,
        )
    }
}

/// A software package and its versions, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Software {
    /// Directory name; unique within a catalog.
    pub name: String,
    /// Legacy single-language description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-language descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<LocalizedDescription>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Versions, never empty in a generated catalog.
    pub versions: Vec<Version>,
}

impl Software {
    /// The first (newest) version.
    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// Description to display for `language`.
    ///
    /// Software without any description text borrows the newest version's.
    #[must_use]
    pub fn description_for(&self, language: Language) -> Option<&str> {
        localization::resolve(
            self.descriptions.as_ref(),
            self.description.as_deref(),
            language,
        )
        .or_else(|| self.latest().and_then(|v| v.description_for(language)))
    }
}

/// The full generated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// All software with at least one version.
    pub software: Vec<Software>,
    /// When the catalog was generated.
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
}

impl Catalog {
    /// Create a catalog stamped with the current time.
    #[must_use]
    pub fn new(software: Vec<Software>) -> Self {
        Self {
            software,
            generated_at: Utc::now(),
        }
    }

    /// Catalog with no software, for a download tree that does not exist yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Look up software by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Software> {
        self.software.iter().find(|s| s.name == name)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously generated document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the document is not a catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the catalog to `path`, creating parent directories as needed.
    ///
    /// The document is written to a temporary sibling and renamed into place,
    /// so readers never observe a half-written catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let json = self.to_json()?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write catalog: {e}")))?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing catalog: {e}")))?;
        }
        fs::rename(&tmp_path, path)
            .map_err(|e| Error::Storage(format!("Failed to commit catalog: {e}")))?;

        debug!("Wrote catalog to {}", path.display());
        Ok(())
    }

    /// Read a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist and
    /// [`Error::Serialization`] if it cannot be parsed.
    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "catalog {} does not exist",
                path.display()
            )));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
