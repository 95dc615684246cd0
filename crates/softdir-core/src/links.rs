//! Download targets as the front end sees them.
//!
//! Direct downloads are served from the published copy of the download tree,
//! so their URL is a relative path made of the software name, version label
//! and file name, each percent-encoded as a single path segment. P2P and
//! official links are used verbatim.

use url::Url;

use crate::catalog::{Download, Software, Version};
use crate::Result;

/// Path prefix under which the download tree is published.
pub const DEFAULT_DOWNLOAD_BASE: &str = "down";

/// Where one download of a version can be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// A file served by the static site.
    File {
        /// File name as shown to the user.
        name: String,
        /// Relative, percent-encoded path to request.
        path: String,
    },
    /// A P2P link to copy into a client.
    P2p(String),
    /// The vendor's download page.
    Official(String),
}

/// Build the relative download path for a file.
///
/// ```rust
/// use softdir_core::links::download_path;
///
/// let path = download_path("down", "Visual Studio Code", "1.95", "VSCode Setup.exe")?;
/// assert_eq!(path, "down/Visual%20Studio%20Code/1.95/VSCode%20Setup.exe");
/// # Ok::<(), softdir_core::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] if the path cannot be assembled.
pub fn download_path(base: &str, software: &str, version: &str, file: &str) -> Result<String> {
    let mut url = Url::parse("http://localhost/")?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| crate::Error::InvalidUrl("base URL cannot hold a path".into()))?;
        segments.pop_if_empty();
        segments.extend(base.split('/').filter(|s| !s.is_empty()));
        segments.push(software).push(version).push(file);
    }
    Ok(url.path().trim_start_matches('/').to_owned())
}

/// Every download target for one version of `software`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] if a direct download path cannot be built.
pub fn download_targets(
    base: &str,
    software: &Software,
    version: &Version,
) -> Result<Vec<DownloadTarget>> {
    match &version.download {
        Download::Direct { files } => files
            .iter()
            .map(|file| {
                Ok(DownloadTarget::File {
                    name: file.clone(),
                    path: download_path(base, &software.name, &version.version, file)?,
                })
            })
            .collect(),
        Download::P2p { p2p_link } => Ok(vec![DownloadTarget::P2p(p2p_link.clone())]),
        Download::Official { official_link } => {
            Ok(vec![DownloadTarget::Official(official_link.clone())])
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_percent_encoded() -> Result<()> {
        assert_eq!(
            download_path("down", "Foo/Bar", "1.0 #2", "setup?.exe")?,
            "down/Foo%2FBar/1.0%20%232/setup%3F.exe"
        );
        Ok(())
    }

    #[test]
    fn test_non_ascii_names_are_utf8_encoded() -> Result<()> {
        assert_eq!(
            download_path("down", "微信", "3.9", "安装.exe")?,
            "down/%E5%BE%AE%E4%BF%A1/3.9/%E5%AE%89%E8%A3%85.exe"
        );
        Ok(())
    }

    #[test]
    fn test_nested_and_empty_base() -> Result<()> {
        assert_eq!(download_path("soft/down/", "a", "1", "b")?, "soft/down/a/1/b");
        assert_eq!(download_path("", "a", "1", "b")?, "a/1/b");
        Ok(())
    }

    #[test]
    fn test_targets_per_download_type() -> Result<()> {
        let software = Software {
            name: "App".into(),
            description: None,
            descriptions: None,
            tags: None,
            versions: Vec::new(),
        };
        let direct = Version {
            version: "1.0".into(),
            description: None,
            descriptions: None,
            download: Download::Direct {
                files: vec!["a.exe".into(), "b.zip".into()],
            },
        };
        assert_eq!(
            download_targets(DEFAULT_DOWNLOAD_BASE, &software, &direct)?,
            vec![
                DownloadTarget::File {
                    name: "a.exe".into(),
                    path: "down/App/1.0/a.exe".into()
                },
                DownloadTarget::File {
                    name: "b.zip".into(),
                    path: "down/App/1.0/b.zip".into()
                },
            ]
        );

        let p2p = Version {
            download: Download::P2p {
                p2p_link: "magnet:?x".into(),
            },
            ..direct.clone()
        };
        assert_eq!(
            download_targets(DEFAULT_DOWNLOAD_BASE, &software, &p2p)?,
            vec![DownloadTarget::P2p("magnet:?x".into())]
        );

        let official = Version {
            download: Download::Official {
                official_link: "https://example.com".into(),
            },
            ..direct
        };
        assert_eq!(
            download_targets(DEFAULT_DOWNLOAD_BASE, &software, &official)?,
            vec![DownloadTarget::Official("https://example.com".into())]
        );
        Ok(())
    }
}
