//! External tool locations.

use std::path::{Path, PathBuf};

/// Paths to the macOS command line tools the pipeline shells out to.
///
/// Defaults point at the system copies under `/usr/bin`. Tests and unusual
/// installs override them through [`SettingsBuilder`](super::SettingsBuilder)
/// or the `[tools]` table of `settings.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPaths {
    /// Builds `.icns` containers from an `.iconset` directory.
    pub iconutil: PathBuf,

    /// Signs and verifies bundles.
    pub codesign: PathBuf,

    /// Manages extended attributes; used for the quarantine fallback.
    pub xattr: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            iconutil: PathBuf::from("/usr/bin/iconutil"),
            codesign: PathBuf::from("/usr/bin/codesign"),
            xattr: PathBuf::from("/usr/bin/xattr"),
        }
    }
}

impl ToolPaths {
    /// Iterates over `(name, path)` pairs for availability checks.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("iconutil", self.iconutil.as_path()),
            ("codesign", self.codesign.as_path()),
            ("xattr", self.xattr.as_path()),
        ]
        .into_iter()
    }
}
