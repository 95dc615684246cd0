//! On-disk normalization of metadata files to UTF-8.
//!
//! This is the write side of [`crate::encoding`], run on its own instead of as
//! a side effect of scanning. It visits the same files the scanner reads
//! (readmes, tag files and link markers at the software and version levels)
//! and rewrites every one that is not UTF-8 but decodes cleanly.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::encoding::{persist_as_utf8, read_text, Decoded, DetectedEncoding};
use crate::metadata::{is_metadata_file, DirectoryEntries};
use crate::Result;

/// What happened to a non-UTF-8 metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeAction {
    /// The file now holds UTF-8.
    Rewritten,
    /// Dry run: the file would have been rewritten.
    WouldRewrite,
    /// No charset matched; rewriting would destroy content.
    SkippedLossy,
    /// Writing the file failed.
    Failed(String),
}

/// A metadata file that was not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Encoding the file was decoded with.
    pub encoding: DetectedEncoding,
    /// Outcome.
    pub action: NormalizeAction,
}

/// Normalize every metadata file under `root`.
///
/// Only files that were not already UTF-8 are reported. A missing root
/// reports nothing.
///
/// # Errors
///
/// Returns an I/O error if `root` exists but cannot be listed. Failures on
/// individual files are reported through [`NormalizeAction::Failed`].
pub fn normalize_tree(root: &Path, dry_run: bool) -> Result<Vec<NormalizedFile>> {
    normalize_tree_with(root, dry_run, read_text)
}

/// [`normalize_tree`] with a pluggable file decoder.
pub(crate) fn normalize_tree_with<R>(
    root: &Path,
    dry_run: bool,
    read: R,
) -> Result<Vec<NormalizedFile>>
where
    R: Fn(&Path) -> Result<Decoded>,
{
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut report = Vec::new();
    let root_entries = DirectoryEntries::read(root)?;
    let mut software_names = root_entries.subdirs().to_vec();
    software_names.sort();

    for software in software_names {
        let software_dir = root.join(&software);
        let Some(entries) = list_or_warn(&software_dir) else {
            continue;
        };
        normalize_directory(&entries, dry_run, &read, &mut report);

        let mut versions = entries.subdirs().to_vec();
        versions.sort();
        for version in versions {
            if let Some(version_entries) = list_or_warn(&software_dir.join(&version)) {
                normalize_directory(&version_entries, dry_run, &read, &mut report);
            }
        }
    }

    Ok(report)
}

fn list_or_warn(dir: &Path) -> Option<DirectoryEntries> {
    DirectoryEntries::read(dir)
        .map_err(|e| warn!("Skipping {}: {e}", dir.display()))
        .ok()
}

fn normalize_directory<R>(
    entries: &DirectoryEntries,
    dry_run: bool,
    read: &R,
    report: &mut Vec<NormalizedFile>,
) where
    R: Fn(&Path) -> Result<Decoded>,
{
    let mut names: Vec<&String> = entries.files().iter().filter(|f| is_metadata_file(f)).collect();
    names.sort();

    for name in names {
        let path = entries.path().join(name);
        let decoded = match read(&path) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                continue;
            },
        };
        if decoded.encoding.is_utf8() {
            continue;
        }

        let action = if decoded.encoding.is_lossy() {
            NormalizeAction::SkippedLossy
        } else if dry_run {
            NormalizeAction::WouldRewrite
        } else {
            match persist_as_utf8(&path, &decoded) {
                Ok(_) => {
                    info!(
                        "Converted {} from {} to UTF-8",
                        path.display(),
                        decoded.encoding.name()
                    );
                    NormalizeAction::Rewritten
                },
                Err(e) => {
                    warn!("{e}");
                    NormalizeAction::Failed(e.to_string())
                },
            }
        };

        report.push(NormalizedFile {
            path,
            encoding: decoded.encoding,
            action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::resolve_with_detector;
    use encoding_rs::{Encoding, GBK, UTF_8};
    use std::fs;
    use tempfile::TempDir;

    const LONG_TEXT: &str = "这是一个免费的办公软件，可以编辑文档、表格和演示文稿，兼容常见的文件格式。";

    fn gbk(text: &str) -> Vec<u8> {
        GBK.encode(text).0.into_owned()
    }

    #[test]
    fn test_rewrites_software_and_version_files() -> Result<()> {
        let temp = TempDir::new()?;
        let app = temp.path().join("App");
        fs::create_dir_all(app.join("1.0"))?;
        fs::write(app.join("readme.md"), gbk(LONG_TEXT))?;
        fs::write(app.join("1.0").join("readme.en.md"), "already utf-8")?;
        fs::write(app.join("1.0").join("setup.exe"), [0x4D, 0x5A, 0x90, 0xFF])?;

        let report = normalize_tree(temp.path(), false)?;

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].path, app.join("readme.md"));
        assert_eq!(report[0].action, NormalizeAction::Rewritten);
        assert!(String::from_utf8(fs::read(app.join("readme.md"))?).is_ok());
        // Downloads are never touched
        assert_eq!(fs::read(app.join("1.0").join("setup.exe"))?, vec![0x4D, 0x5A, 0x90, 0xFF]);
        Ok(())
    }

    #[test]
    fn test_dry_run_leaves_files_alone() -> Result<()> {
        let temp = TempDir::new()?;
        let version = temp.path().join("App").join("2.0");
        fs::create_dir_all(&version)?;
        let bytes = gbk(LONG_TEXT);
        fs::write(version.join("readme.md"), &bytes)?;

        let report = normalize_tree(temp.path(), true)?;
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].action, NormalizeAction::WouldRewrite);
        assert_eq!(fs::read(version.join("readme.md"))?, bytes);
        Ok(())
    }

    fn read_without_detection(path: &Path) -> Result<Decoded> {
        let no_opinion = |_: &[u8]| -> &'static Encoding { UTF_8 };
        Ok(resolve_with_detector(&fs::read(path)?, no_opinion))
    }

    #[test]
    fn test_lossy_files_are_reported_but_not_rewritten() -> Result<()> {
        // Given: a readme no charset decodes cleanly
        let temp = TempDir::new()?;
        let app = temp.path().join("App");
        fs::create_dir_all(app.join("1.0"))?;
        let bytes = vec![b'a', 0xFF, b'b'];
        fs::write(app.join("readme.md"), &bytes)?;

        // When
        let report = normalize_tree_with(temp.path(), false, read_without_detection)?;

        // Then: it is reported as skipped and its bytes survive
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].encoding, DetectedEncoding::LossyAscii);
        assert_eq!(report[0].action, NormalizeAction::SkippedLossy);
        assert_eq!(fs::read(app.join("readme.md"))?, bytes);
        Ok(())
    }

    #[test]
    fn test_write_failure_is_reported() -> Result<()> {
        let temp = TempDir::new()?;
        let version = temp.path().join("App").join("1.0");
        fs::create_dir_all(&version)?;
        let path = version.join("readme.md");
        fs::write(&path, gbk(LONG_TEXT))?;

        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions)?;
        // Privileged users can write read-only files; nothing to observe then
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            return Ok(());
        }

        let report = normalize_tree(temp.path(), false)?;

        assert_eq!(report.len(), 1);
        assert!(matches!(
            report[0].action,
            NormalizeAction::Failed(ref reason) if reason.contains("readme.md")
        ));
        assert_eq!(fs::read(&path)?, gbk(LONG_TEXT));
        Ok(())
    }

    #[test]
    fn test_missing_root_reports_nothing() -> Result<()> {
        let temp = TempDir::new()?;
        assert!(normalize_tree(&temp.path().join("down"), false)?.is_empty());
        Ok(())
    }
}
