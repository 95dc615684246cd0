//! Generator configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. **Built-in defaults** (matching the layout of a typical static site)
//! 2. **`softdir.toml`** in the working directory, or the file passed via `--config`
//! 3. **Environment variables**: `SOFTDIR_SOURCE_DIR`, `SOFTDIR_OUTPUT`,
//!    `SOFTDIR_NORMALIZE`, `SOFTDIR_DOWNLOAD_BASE`
//! 4. **Command-line flags**, applied by the CLI
//!
//! ## Example Configuration File
//!
//! ```toml
//! source_dir = "down"
//! output = "public/data/software.json"
//! normalize_encoding = false
//! sort_resources = true
//! download_base = "down"
//! ```
//!
//! ```rust
//! use softdir_core::GeneratorConfig;
//!
//! let config: GeneratorConfig = toml::from_str("normalize_encoding = true")?;
//! assert!(config.normalize_encoding);
//! assert_eq!(config.output.to_str(), Some("public/data/software.json"));
//! # Ok::<(), toml::de::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::links::DEFAULT_DOWNLOAD_BASE;
use crate::scanner::ScanOptions;
use crate::{Error, Result};

/// File name looked up in the working directory when no config path is given.
pub const CONFIG_FILE_NAME: &str = "softdir.toml";

/// Environment variable overriding [`GeneratorConfig::source_dir`].
pub const ENV_SOURCE_DIR: &str = "SOFTDIR_SOURCE_DIR";
/// Environment variable overriding [`GeneratorConfig::output`].
pub const ENV_OUTPUT: &str = "SOFTDIR_OUTPUT";
/// Environment variable overriding [`GeneratorConfig::normalize_encoding`].
pub const ENV_NORMALIZE: &str = "SOFTDIR_NORMALIZE";
/// Environment variable overriding [`GeneratorConfig::download_base`].
pub const ENV_DOWNLOAD_BASE: &str = "SOFTDIR_DOWNLOAD_BASE";

/// Settings for one catalog build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root of the download tree (`<software>/<version>/...`).
    pub source_dir: PathBuf,

    /// Where the catalog JSON is written.
    pub output: PathBuf,

    /// Rewrite legacy-encoded metadata files as UTF-8 during generation.
    ///
    /// Off by default so that generating a catalog never modifies the tree.
    pub normalize_encoding: bool,

    /// Sort software by name for reproducible output.
    pub sort_resources: bool,

    /// Path prefix under which the download tree is published, used when
    /// building direct download links.
    pub download_base: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("down"),
            output: PathBuf::from("public/data/software.json"),
            normalize_encoding: false,
            sort_resources: true,
            download_base: DEFAULT_DOWNLOAD_BASE.to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing, unreadable, or not
    /// valid configuration TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Load `softdir.toml` from `dir` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but cannot be parsed.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `SOFTDIR_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a boolean variable has an unrecognized value.
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a boolean value is not recognized.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_SOURCE_DIR).filter(|v| !v.is_empty()) {
            self.source_dir = PathBuf::from(dir);
        }
        if let Some(output) = lookup(ENV_OUTPUT).filter(|v| !v.is_empty()) {
            self.output = PathBuf::from(output);
        }
        if let Some(raw) = lookup(ENV_NORMALIZE).filter(|v| !v.is_empty()) {
            self.normalize_encoding = parse_bool(ENV_NORMALIZE, &raw)?;
        }
        if let Some(base) = lookup(ENV_DOWNLOAD_BASE) {
            self.download_base = base;
        }
        Ok(self)
    }

    /// Scanner options derived from this configuration.
    #[must_use]
    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            sort_resources: self.sort_resources,
            normalize_encoding: self.normalize_encoding,
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{key} must be a boolean (true/false), got '{other}'"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = GeneratorConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("down"));
        assert_eq!(config.output, PathBuf::from("public/data/software.json"));
        assert!(!config.normalize_encoding);
        assert!(config.sort_resources);
        assert_eq!(config.download_base, "down");
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("custom.toml");
        fs::write(&path, "source_dir = \"files\"\nsort_resources = false\n")?;

        let config = GeneratorConfig::load(&path)?;
        assert_eq!(config.source_dir, PathBuf::from("files"));
        assert!(!config.sort_resources);
        assert_eq!(config.output, GeneratorConfig::default().output);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = GeneratorConfig::load(Path::new("/definitely/not/softdir.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("Failed to read config")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "source_dir = [unterminated")?;
        assert!(matches!(GeneratorConfig::load(&path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_rejected() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "sourcedir = \"typo\"")?;
        assert!(GeneratorConfig::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_discover_without_file_uses_defaults() -> Result<()> {
        let temp = TempDir::new()?;
        assert_eq!(GeneratorConfig::discover(temp.path())?, GeneratorConfig::default());

        fs::write(temp.path().join(CONFIG_FILE_NAME), "output = \"dist/catalog.json\"")?;
        assert_eq!(
            GeneratorConfig::discover(temp.path())?.output,
            PathBuf::from("dist/catalog.json")
        );
        Ok(())
    }

    #[test]
    fn test_overrides_win_over_file_values() -> Result<()> {
        let config = GeneratorConfig::default().with_overrides(lookup_from(&[
            (ENV_SOURCE_DIR, "/srv/down"),
            (ENV_OUTPUT, "/srv/site/software.json"),
            (ENV_NORMALIZE, "yes"),
            (ENV_DOWNLOAD_BASE, "files"),
        ]))?;
        assert_eq!(config.source_dir, PathBuf::from("/srv/down"));
        assert_eq!(config.output, PathBuf::from("/srv/site/software.json"));
        assert!(config.normalize_encoding);
        assert_eq!(config.download_base, "files");
        Ok(())
    }

    #[test]
    fn test_empty_overrides_are_ignored() -> Result<()> {
        let config = GeneratorConfig::default()
            .with_overrides(lookup_from(&[(ENV_SOURCE_DIR, ""), (ENV_NORMALIZE, "")]))?;
        assert_eq!(config, GeneratorConfig::default());
        Ok(())
    }

    #[test]
    fn test_bad_boolean_override() {
        let err = GeneratorConfig::default()
            .with_overrides(lookup_from(&[(ENV_NORMALIZE, "maybe")]))
            .unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_scan_options_follow_config() {
        let config = GeneratorConfig {
            normalize_encoding: true,
            sort_resources: false,
            ..GeneratorConfig::default()
        };
        let options = config.scan_options();
        assert!(options.normalize_encoding);
        assert!(!options.sort_resources);
    }
}
