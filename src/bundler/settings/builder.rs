//! Builder for constructing Settings.

use super::{Settings, SettingsFile, ToolPaths};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wait limit for each external tool invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Default third-party favicon resolver (256 px variant).
pub const DEFAULT_FAVICON_API: &str = "https://www.google.com/s2/favicons?domain={host}&sz=256";

/// Default user agent for favicon discovery.
pub const DEFAULT_USER_AGENT: &str = concat!("web2app/", env!("CARGO_PKG_VERSION"));

/// File name of the launcher executable inside the data directory and bundles.
pub const LAUNCHER_EXECUTABLE: &str = "WebAppLauncher";

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building generator settings with validation.
/// Only the data directory is required; everything else has a default
/// derived from it or from the platform.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use web2app::bundler::SettingsBuilder;
///
/// # fn example() -> web2app::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .data_directory("/tmp/web2app")
///     .output_directory("/tmp/web2app/out")
///     .tool_timeout(Duration::from_secs(30))
///     .favicon_api(None)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct SettingsBuilder {
    output_directory: Option<PathBuf>,
    launcher_binary: Option<PathBuf>,
    data_directory: Option<PathBuf>,
    applications_directory: Option<PathBuf>,
    tools: ToolPaths,
    tool_timeout: Option<Duration>,
    favicon_api: Option<Option<String>>,
    user_agent: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the private data directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn data_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets where bundles are written.
    ///
    /// Default: `<data_directory>/GeneratedApps`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the launcher executable to copy into bundles.
    ///
    /// Default: `<data_directory>/WebAppLauncher`
    pub fn launcher_binary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.launcher_binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the shared applications directory.
    ///
    /// Default: `/Applications`
    pub fn applications_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.applications_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces all external tool paths.
    pub fn tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the wait limit for each external tool.
    ///
    /// Default: [`DEFAULT_TOOL_TIMEOUT`]
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    /// Sets or disables the third-party favicon resolver.
    ///
    /// Default: [`DEFAULT_FAVICON_API`]
    pub fn favicon_api(mut self, template: Option<String>) -> Self {
        self.favicon_api = Some(template);
        self
    }

    /// Sets the user agent for favicon discovery.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Overlays values present in a parsed `settings.toml`.
    ///
    /// Call before the explicit setters that should take precedence.
    pub fn apply_file(mut self, file: SettingsFile) -> Self {
        if let Some(dir) = file.output_directory {
            self.output_directory = Some(dir);
        }
        if let Some(launcher) = file.launcher_binary {
            self.launcher_binary = Some(launcher);
        }
        if let Some(dir) = file.applications_directory {
            self.applications_directory = Some(dir);
        }
        if let Some(secs) = file.tool_timeout_secs {
            self.tool_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(api) = file.favicon_api {
            // An empty string in the file switches the resolver off.
            self.favicon_api = Some((!api.is_empty()).then_some(api));
        }
        if let Some(agent) = file.user_agent {
            self.user_agent = Some(agent);
        }
        if let Some(path) = file.tools.iconutil {
            self.tools.iconutil = path;
        }
        if let Some(path) = file.tools.codesign {
            self.tools.codesign = path;
        }
        if let Some(path) = file.tools.xattr {
            self.tools.xattr = path;
        }
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `data_directory` is missing.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let data_directory = self
            .data_directory
            .context("data_directory is required")?;

        let output_directory = self
            .output_directory
            .unwrap_or_else(|| data_directory.join("GeneratedApps"));
        let launcher_binary = self
            .launcher_binary
            .unwrap_or_else(|| data_directory.join(LAUNCHER_EXECUTABLE));

        Ok(Settings::new(
            output_directory,
            launcher_binary,
            data_directory,
            self.applications_directory
                .unwrap_or_else(|| PathBuf::from("/Applications")),
            self.tools,
            self.tool_timeout.unwrap_or(DEFAULT_TOOL_TIMEOUT),
            self.favicon_api
                .unwrap_or_else(|| Some(DEFAULT_FAVICON_API.to_string())),
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_directory_is_required() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("data_directory"));
    }

    #[test]
    fn defaults_derive_from_data_directory() {
        let settings = SettingsBuilder::new()
            .data_directory("/data/Web2App")
            .build()
            .unwrap();

        assert_eq!(
            settings.output_directory(),
            Path::new("/data/Web2App/GeneratedApps")
        );
        assert_eq!(
            settings.launcher_binary(),
            Path::new("/data/Web2App/WebAppLauncher")
        );
        assert_eq!(settings.applications_directory(), Path::new("/Applications"));
        assert_eq!(settings.tool_timeout(), DEFAULT_TOOL_TIMEOUT);
        assert_eq!(settings.favicon_api(), Some(DEFAULT_FAVICON_API));
        assert!(settings.is_shared_location(Path::new("/Applications/Mail.app")));
        assert!(!settings.is_shared_location(Path::new("/Users/me/Mail.app")));
    }

    #[test]
    fn explicit_setters_override_file_values() {
        let file: SettingsFile = toml::from_str(
            r#"
            output_directory = "/from/file"
            tool_timeout_secs = 5
            favicon_api = ""

            [tools]
            codesign = "/opt/bin/codesign"
            "#,
        )
        .unwrap();

        let settings = SettingsBuilder::new()
            .data_directory("/data")
            .apply_file(file)
            .output_directory("/from/cli")
            .build()
            .unwrap();

        assert_eq!(settings.output_directory(), Path::new("/from/cli"));
        assert_eq!(settings.tool_timeout(), Duration::from_secs(5));
        assert_eq!(settings.favicon_api(), None);
        assert_eq!(settings.tools().codesign, PathBuf::from("/opt/bin/codesign"));
        assert_eq!(settings.tools().iconutil, PathBuf::from("/usr/bin/iconutil"));
    }
}
