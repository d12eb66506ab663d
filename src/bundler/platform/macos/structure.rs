//! `.app` bundle skeleton and name sanitization.

use crate::bundler::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_APP_NAME: &str = "WebApp";

/// Directory extension that marks an application bundle.
pub const BUNDLE_EXTENSION: &str = "app";

/// Executable name inside `Contents/MacOS`.
pub const EXECUTABLE_NAME: &str = "WebAppLauncher";

/// Icon base name referenced from `Info.plist`.
pub const ICON_NAME: &str = "AppIcon";

/// Strips characters that could escape the output directory.
///
/// Removes `/`, `\`, `:` and NUL, then every literal `..`, then trims
/// whitespace. Returns [`FALLBACK_APP_NAME`] if nothing is left.
pub fn sanitize_app_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '\0'))
        .collect();
    let stripped = stripped.replace("..", "");
    let trimmed = stripped.trim();

    if trimmed.is_empty() {
        FALLBACK_APP_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Path a bundle for `name` would occupy under `root`.
pub fn bundle_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.{BUNDLE_EXTENSION}", sanitize_app_name(name)))
}

/// Well-known paths inside one `.app` bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    /// Wraps an existing or planned bundle root (`…/Name.app`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `Name.app`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Name.app/Contents`
    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    /// `Name.app/Contents/MacOS`
    pub fn macos_dir(&self) -> PathBuf {
        self.contents_dir().join("MacOS")
    }

    /// `Name.app/Contents/Resources`
    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// `Name.app/Contents/MacOS/WebAppLauncher`
    pub fn executable(&self) -> PathBuf {
        self.macos_dir().join(EXECUTABLE_NAME)
    }

    /// `Name.app/Contents/Info.plist`
    pub fn info_plist(&self) -> PathBuf {
        self.contents_dir().join("Info.plist")
    }

    /// `Name.app/Contents/Resources/config.plist`
    pub fn config_plist(&self) -> PathBuf {
        self.resources_dir().join("config.plist")
    }

    /// `Name.app/Contents/Resources/AppIcon.icns`
    pub fn icon_file(&self) -> PathBuf {
        self.resources_dir().join(format!("{ICON_NAME}.icns"))
    }
}

/// Creates `root/<sanitized name>.app/Contents/{MacOS,Resources}`.
///
/// `root` is created if missing. The bundle directory itself must not exist
/// yet; callers remove stale bundles first.
pub async fn build_bundle_structure(root: &Path, name: &str) -> Result<BundleLayout> {
    let layout = BundleLayout::new(bundle_path(root, name));

    tokio::fs::create_dir_all(root)
        .await
        .fs_context("creating output directory", root)?;
    tokio::fs::create_dir(layout.root())
        .await
        .fs_context("creating bundle directory", layout.root())?;

    for dir in [layout.macos_dir(), layout.resources_dir()] {
        tokio::fs::create_dir_all(&dir)
            .await
            .fs_context("creating bundle structure", &dir)?;
    }

    log::info!("Created bundle structure at {}", layout.root().display());
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_names_pass_through() {
        assert_eq!(sanitize_app_name("My App"), "My App");
        assert_eq!(sanitize_app_name("Hacker News"), "Hacker News");
    }

    #[test]
    fn traversal_sequences_are_removed() {
        assert_eq!(sanitize_app_name("../../Evil"), "Evil");
        assert_eq!(sanitize_app_name("test/../../../etc"), "testetc");
        assert_eq!(sanitize_app_name("/../.."), FALLBACK_APP_NAME);
    }

    #[test]
    fn separators_and_nul_are_stripped() {
        assert_eq!(sanitize_app_name("test/app"), "testapp");
        assert_eq!(sanitize_app_name("test\\app"), "testapp");
        assert_eq!(sanitize_app_name("test:app"), "testapp");
        assert_eq!(sanitize_app_name("test\0app"), "testapp");
    }

    #[test]
    fn blank_names_fall_back() {
        assert_eq!(sanitize_app_name(""), FALLBACK_APP_NAME);
        assert_eq!(sanitize_app_name("   "), FALLBACK_APP_NAME);
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for name in [
            "My App",
            "../../Evil",
            "a...b",
            "..... x .....",
            " /\\:\0 ",
            "test/../../../etc",
            "Ünïcødé ✓",
        ] {
            let once = sanitize_app_name(name);
            assert_eq!(sanitize_app_name(&once), once, "input {name:?}");
        }
    }

    #[test]
    fn layout_paths() {
        let layout = BundleLayout::new("/out/Mail.app");
        assert_eq!(layout.executable(), Path::new("/out/Mail.app/Contents/MacOS/WebAppLauncher"));
        assert_eq!(layout.info_plist(), Path::new("/out/Mail.app/Contents/Info.plist"));
        assert_eq!(
            layout.config_plist(),
            Path::new("/out/Mail.app/Contents/Resources/config.plist")
        );
        assert_eq!(
            layout.icon_file(),
            Path::new("/out/Mail.app/Contents/Resources/AppIcon.icns")
        );
        assert_eq!(bundle_path(Path::new("/out"), "../Mail"), Path::new("/out/Mail.app"));
    }

    #[tokio::test]
    async fn builds_contents_tree_directly_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let layout = build_bundle_structure(dir.path(), "My Test App").await.unwrap();

        assert!(layout.root().ends_with("My Test App.app"));
        assert_eq!(layout.root().parent(), Some(dir.path()));
        assert!(layout.macos_dir().is_dir());
        assert!(layout.resources_dir().is_dir());
    }

    #[tokio::test]
    async fn existing_bundle_is_not_reused() {
        let dir = tempfile::tempdir().unwrap();
        build_bundle_structure(dir.path(), "Mail").await.unwrap();
        assert!(build_bundle_structure(dir.path(), "Mail").await.is_err());
    }
}
