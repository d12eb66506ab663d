//! Launcher-side view of the runtime configuration.
//!
//! The launcher executable inside every generated bundle reads
//! `Contents/Resources/config.plist` at start-up. This module is that reader:
//! it is what the launcher links against and what tests use to check a
//! generated bundle end to end.

use crate::bundler::platform::macos::{plist::RuntimeConfig, structure::BundleLayout};
use std::path::{Path, PathBuf};
use url::Url;

/// Launch-time configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("Configuration file not found. This app may be corrupted.")]
    NotFound(PathBuf),

    /// The file exists but is not a readable property list.
    #[error("Configuration file is unreadable: {0}")]
    Unreadable(String),

    /// A required key is absent.
    #[error("Configuration is missing {0}")]
    MissingField(&'static str),

    /// `URL` is not an absolute URL.
    #[error("Configured URL is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Parsed runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherConfig {
    pub url: Url,
    pub app_name: String,
    pub allowed_domains: Vec<String>,
}

impl LauncherConfig {
    /// Reads `config.plist` from the bundle rooted at `bundle`.
    pub fn load_from_bundle(bundle: &Path) -> Result<Self, ConfigError> {
        Self::load(&BundleLayout::new(bundle).config_plist())
    }

    /// Reads a runtime configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(ConfigError::Unreadable(e.to_string())),
        };
        Self::from_bytes(&bytes)
    }

    /// Parses a runtime configuration from property list bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let dictionary = plist::Value::from_reader(std::io::Cursor::new(bytes))
            .map_err(|e| ConfigError::Unreadable(e.to_string()))?
            .into_dictionary()
            .ok_or_else(|| ConfigError::Unreadable("root is not a dictionary".into()))?;

        // Required keys are checked one by one for a precise message before
        // the typed decode.
        for key in ["URL", "AppName"] {
            if dictionary.get(key).and_then(plist::Value::as_string).is_none() {
                return Err(ConfigError::MissingField(key));
            }
        }

        let raw: RuntimeConfig =
            plist::from_bytes(bytes).map_err(|e| ConfigError::Unreadable(e.to_string()))?;

        Ok(Self {
            url: Url::parse(&raw.url)?,
            app_name: raw.app_name,
            allowed_domains: raw.allowed_domains,
        })
    }

    /// Configured domains plus the URL host and its `www.` counterpart.
    pub fn all_allowed_domains(&self) -> Vec<String> {
        let mut domains = self.allowed_domains.clone();
        if let Some(host) = self.url.host_str() {
            domains.push(host.to_string());
            match host.strip_prefix("www.") {
                Some(bare) => domains.push(bare.to_string()),
                None => domains.push(format!("www.{host}")),
            }
        }
        domains
    }
}
