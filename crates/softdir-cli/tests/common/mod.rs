#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `softdir` command isolated from the caller's environment.
#[allow(dead_code)]
pub fn softdir_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("softdir"));
    cmd.timeout(CMD_TIMEOUT);
    for key in [
        "SOFTDIR_CONFIG",
        "SOFTDIR_SOURCE_DIR",
        "SOFTDIR_OUTPUT",
        "SOFTDIR_NORMALIZE",
        "SOFTDIR_DOWNLOAD_BASE",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `contents` to `root/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small download tree exercising every download type.
///
/// ```text
/// down/
///   App/            readme.md, readme.en.md, tags.txt
///     1.0/          setup.exe
///     2.0/          App Setup.exe, readme.en.md
///   Portal/         official.txt (no versions)
///   Torrent/
///     1.0/          link.txt
/// ```
#[allow(dead_code)]
pub fn sample_tree(root: &Path) {
    write_file(root, "App/readme.md", "一个示例应用");
    write_file(root, "App/readme.en.md", "An example app");
    write_file(root, "App/tags.txt", "tools\n\nutilities\n");
    write_file(root, "App/1.0/setup.exe", [0x4D, 0x5A]);
    write_file(root, "App/2.0/App Setup.exe", [0x4D, 0x5A]);
    write_file(root, "App/2.0/readme.en.md", "Second release");
    write_file(root, "Portal/official.txt", "https://portal.example.com/download\n");
    write_file(root, "Torrent/1.0/link.txt", "magnet:?xt=urn:btih:abc\n");
}
