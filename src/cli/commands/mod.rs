//! Command execution.
//!
//! Each subcommand gets a [`CommandContext`] carrying the resolved settings
//! and the output manager.

mod create;
mod fetch_icon;
mod manage;

pub use create::create;
pub use fetch_icon::fetch_icon;
pub use manage::{delete, list, regenerate, update};

use super::{Args, OutputManager};
use crate::{
    bundler::{DeletionGuard, PackageGenerator, Settings, SettingsBuilder, settings::SettingsFile},
    error::{CliError, Result},
    favicon::FaviconFetcher,
    model::{WebApp, WebUrl},
    store::WebAppStore,
};
use std::path::{Path, PathBuf};

/// Name of the data directory under the platform data root.
pub const DATA_DIRECTORY_NAME: &str = "Web2App";

/// Resolved configuration shared by all commands.
#[derive(Debug)]
pub struct CommandContext {
    settings: Settings,
    output: OutputManager,
}

impl CommandContext {
    /// Resolves settings from defaults, `settings.toml` and flags, in that order.
    pub fn from_args(args: &Args) -> Result<Self> {
        let data_directory = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_directory()?,
        };

        let mut builder = SettingsBuilder::new().data_directory(&data_directory);
        if let Some(file) = SettingsFile::load(&data_directory)? {
            builder = builder.apply_file(file);
        }
        if let Some(launcher) = &args.launcher {
            builder = builder.launcher_binary(launcher);
        }
        if let Some(output_dir) = &args.output_dir {
            builder = builder.output_directory(output_dir);
        }

        Ok(Self {
            settings: builder.build()?,
            output: OutputManager::new(args.quiet),
        })
    }

    /// Resolved settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Output manager.
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Opens the descriptor store in the data directory.
    pub async fn open_store(&self) -> Result<WebAppStore> {
        Ok(WebAppStore::open(
            self.settings.store_path(),
            DeletionGuard::for_settings(&self.settings),
        )
        .await?)
    }

    /// Creates a bundle generator.
    pub fn generator(&self) -> PackageGenerator {
        PackageGenerator::new(self.settings.clone())
    }

    /// Discovers an icon for `url`, reporting the outcome.
    pub async fn discover_icon(&self, url: &WebUrl) -> Result<Option<Vec<u8>>> {
        self.output.progress(&format!("Looking for an icon on {}", url))?;
        let icon = FaviconFetcher::from_settings(&self.settings)?
            .fetch(url.url())
            .await;
        match &icon {
            Some(bytes) => self.output.indent(&format!("found icon ({} bytes)", bytes.len()))?,
            None => self.output.warn("No icon found; the app will use the default icon")?,
        }
        Ok(icon)
    }
}

fn default_data_directory() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIRECTORY_NAME))
        .ok_or_else(|| {
            CliError::InvalidArguments {
                reason: "cannot determine the data directory; pass --data-dir".to_string(),
            }
            .into()
        })
}

/// Reads an icon file, warning if the image cannot be decoded.
async fn read_icon(context: &CommandContext, path: &Path) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path).await?;
    if let Err(e) = crate::bundler::platform::macos::icon::decode_icon(&bytes) {
        context.output().warn(&format!(
            "{} is not a readable image ({}); the app will use the default icon",
            path.display(),
            e
        ))?;
    }
    Ok(bytes)
}

/// Looks up a stored web app or fails with [`CliError::UnknownApp`].
fn find_app(store: &WebAppStore, key: &str) -> Result<WebApp> {
    store.find(key).cloned().ok_or_else(|| {
        CliError::UnknownApp {
            key: key.to_string(),
        }
        .into()
    })
}

/// Warns about missing tools before a generation.
fn preflight(context: &CommandContext) -> Result<()> {
    for missing in crate::bundler::check_tools(context.settings()) {
        context
            .output()
            .warn(&format!("{missing} is not available; generation will likely fail"))?;
    }
    Ok(())
}
