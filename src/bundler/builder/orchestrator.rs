//! Main bundle generation pipeline.
//!
//! This module provides the [`PackageGenerator`] that sequences every step
//! needed to turn a [`WebApp`] descriptor into a launchable `.app`.

use crate::{
    bundler::{
        Result, Settings,
        platform::macos::{
            icon::{decode_icon, generate_icns},
            plist::{generate_config_plist, generate_info_plist},
            quarantine::{remove_quarantine, remove_quarantine_with_tool},
            removal::DeletionGuard,
            structure::{bundle_path, build_bundle_structure, sanitize_app_name},
        },
        utils::fs,
    },
    model::WebApp,
};
use std::path::{Path, PathBuf};

use super::{locks::NameLocks, signing::CodeSigner};

/// Bundle generation orchestrator.
///
/// Steps run strictly in order and the first failure aborts the run. There is
/// no rollback: a failed run can leave a partial bundle behind, which the
/// next run for the same name removes in its first step.
///
/// # Examples
///
/// ```no_run
/// use web2app::bundler::{PackageGenerator, Settings};
/// use web2app::model::WebApp;
///
/// # async fn example(settings: Settings, app: WebApp) -> web2app::bundler::Result<()> {
/// let generator = PackageGenerator::new(settings);
/// let bundle = generator.generate(&app).await?;
/// assert!(bundle.ends_with(format!("{}.app", app.name)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PackageGenerator {
    settings: Settings,
    signer: CodeSigner,
    guard: DeletionGuard,
    locks: NameLocks,
}

impl PackageGenerator {
    /// Creates a generator with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            signer: CodeSigner::from_settings(&settings),
            guard: DeletionGuard::for_settings(&settings),
            locks: NameLocks::new(),
            settings,
        }
    }

    /// Returns a reference to the generator settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the guard used when replacing renamed bundles.
    pub fn deletion_guard(&self) -> &DeletionGuard {
        &self.guard
    }

    /// Generates `app` into the configured output directory.
    pub async fn generate(&self, app: &WebApp) -> Result<PathBuf> {
        self.generate_in(app, self.settings.output_directory()).await
    }

    /// Generates `app` into `output_directory` and returns the bundle path.
    ///
    /// # Errors
    ///
    /// Filesystem errors for skeleton, copy and write steps; icon, signing and
    /// verification errors from the external tools; a timeout if any tool
    /// exceeds [`Settings::tool_timeout`].
    pub async fn generate_in(&self, app: &WebApp, output_directory: &Path) -> Result<PathBuf> {
        let name = sanitize_app_name(&app.name);
        let _lock = self.locks.acquire(&name).await;

        log::info!("Generating {} for {}", name, app.url);

        // Step 0: clear out any previous bundle with this name.
        let target = bundle_path(output_directory, &name);
        if tokio::fs::symlink_metadata(&target).await.is_ok() {
            log::info!("Removing existing bundle at {}", target.display());
            fs::remove_dir_all(&target).await?;
        }

        let layout = build_bundle_structure(output_directory, &name).await?;

        let executable = layout.executable();
        fs::copy_file(self.settings.launcher_binary(), &executable).await?;
        fs::set_executable(&executable).await?;
        log::debug!("Installed launcher at {}", executable.display());

        // Plists carry the display name; only paths use the sanitized one.
        let info = generate_info_plist(&app.name, &app.bundle_identifier)?;
        fs::write_file(&layout.info_plist(), &info).await?;

        let config = generate_config_plist(app.url.as_str(), &app.name, &app.allowed_domains)?;
        fs::write_file(&layout.config_plist(), &config).await?;

        if let Some(bytes) = &app.icon {
            match decode_icon(bytes) {
                Ok(image) => {
                    let icns = generate_icns(
                        image,
                        &self.settings.tools().iconutil,
                        self.settings.tool_timeout(),
                    )
                    .await?;
                    fs::write_file(&layout.icon_file(), &icns).await?;
                }
                Err(e) => log::warn!("Icon data could not be decoded, continuing without: {}", e),
            }
        }

        self.signer.sign(layout.root()).await?;
        self.signer.verify(layout.root()).await?;

        self.clear_quarantine(layout.root()).await;

        log::info!("✓ Generated {}", layout.root().display());
        Ok(layout.root().to_path_buf())
    }

    /// Rebuilds `app` after an edit.
    ///
    /// The new bundle goes next to the previous one when a previous path is
    /// recorded. If the edit changed the bundle path, the old bundle is
    /// removed through the deletion guard once the new one is in place.
    pub async fn regenerate(&self, app: &WebApp) -> Result<PathBuf> {
        let output_directory = app
            .generated_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| self.settings.output_directory())
            .to_path_buf();

        let bundle = self.generate_in(app, &output_directory).await?;

        if let Some(previous) = &app.generated_path
            && *previous != bundle
        {
            self.guard.remove(previous).await;
        }

        Ok(bundle)
    }

    async fn clear_quarantine(&self, bundle: &Path) {
        let root = bundle.to_path_buf();
        let summary = match tokio::task::spawn_blocking(move || remove_quarantine(&root)).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Quarantine pass did not complete: {}", e);
                Default::default()
            }
        };

        if self.settings.is_shared_location(bundle) || summary.denied > 0 {
            remove_quarantine_with_tool(
                &self.settings.tools().xattr,
                bundle,
                self.settings.tool_timeout(),
            )
            .await;
        }
    }
}
