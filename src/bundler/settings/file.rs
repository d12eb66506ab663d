//! `settings.toml` loading.

use std::path::{Path, PathBuf};

/// File name of the optional settings file inside the data directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// On-disk settings overlay.
///
/// Every key is optional; missing keys keep the builder defaults.
///
/// ```toml
/// output_directory = "/Users/me/Applications"
/// tool_timeout_secs = 60
/// favicon_api = ""          # disable the third-party resolver
///
/// [tools]
/// codesign = "/usr/bin/codesign"
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    #[serde(default)]
    pub launcher_binary: Option<PathBuf>,

    #[serde(default)]
    pub applications_directory: Option<PathBuf>,

    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,

    #[serde(default)]
    pub favicon_api: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub tools: ToolOverrides,
}

/// `[tools]` table of the settings file.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverrides {
    #[serde(default)]
    pub iconutil: Option<PathBuf>,

    #[serde(default)]
    pub codesign: Option<PathBuf>,

    #[serde(default)]
    pub xattr: Option<PathBuf>,
}

impl SettingsFile {
    /// Loads `settings.toml` from `data_directory`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(data_directory: &Path) -> crate::error::Result<Option<Self>> {
        let path = data_directory.join(SETTINGS_FILE_NAME);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let file: Self = toml::from_str(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(Some(file))
    }
}
