//! Core Settings struct and implementations.

use super::ToolPaths;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings for package generation.
///
/// Central configuration for the generator, constructed via [`SettingsBuilder`].
///
/// # Examples
///
/// ```no_run
/// use web2app::bundler::SettingsBuilder;
///
/// # fn example() -> web2app::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .data_directory("/Users/me/Library/Application Support/Web2App")
///     .launcher_binary("/Applications/Web2App.app/Contents/Resources/WebAppLauncher")
///     .build()?;
///
/// assert!(settings.output_directory().ends_with("GeneratedApps"));
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Where new bundles are written.
    output_directory: PathBuf,

    /// Prebuilt launcher executable copied into every bundle.
    launcher_binary: PathBuf,

    /// Private application data directory (descriptor store, settings file).
    data_directory: PathBuf,

    /// System-wide applications folder, normally `/Applications`.
    applications_directory: PathBuf,

    /// External tool locations.
    tools: ToolPaths,

    /// Upper bound on how long any single external tool may run.
    tool_timeout: Duration,

    /// Third-party favicon resolver. `{host}` is replaced with the site host.
    /// `None` disables that discovery strategy.
    favicon_api: Option<String>,

    /// User agent sent with favicon discovery requests.
    user_agent: String,
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        output_directory: PathBuf,
        launcher_binary: PathBuf,
        data_directory: PathBuf,
        applications_directory: PathBuf,
        tools: ToolPaths,
        tool_timeout: Duration,
        favicon_api: Option<String>,
        user_agent: String,
    ) -> Self {
        Self {
            output_directory,
            launcher_binary,
            data_directory,
            applications_directory,
            tools,
            tool_timeout,
            favicon_api,
            user_agent,
        }
    }

    /// Returns the directory new bundles are written to.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the launcher executable copied into each bundle.
    pub fn launcher_binary(&self) -> &Path {
        &self.launcher_binary
    }

    /// Returns the private application data directory.
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// Returns the location of the descriptor store inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_directory.join("webapps.json")
    }

    /// Returns the shared applications directory.
    pub fn applications_directory(&self) -> &Path {
        &self.applications_directory
    }

    /// Returns the configured external tool paths.
    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// Returns the wait limit applied to each external tool.
    pub fn tool_timeout(&self) -> Duration {
        self.tool_timeout
    }

    /// Returns the favicon resolver URL template, if enabled.
    pub fn favicon_api(&self) -> Option<&str> {
        self.favicon_api.as_deref()
    }

    /// Returns the HTTP user agent for favicon discovery.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether `path` lives in the shared applications directory, where the
    /// direct attribute call may be refused and the `xattr` tool is needed.
    pub fn is_shared_location(&self, path: &Path) -> bool {
        path.starts_with(&self.applications_directory)
    }
}
