//! Ad-hoc code signing and verification.
//!
//! Generated bundles are signed with the ad-hoc identity (`-`), which is
//! enough for local Gatekeeper trust but not for distribution. Verification
//! always runs after signing and before the bundle is handed back.

use crate::bundler::{
    Settings,
    error::{Error, Result},
    utils::process::run_tool,
};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    time::Duration,
};

/// Runs `codesign` against finished bundles.
#[derive(Clone, Debug)]
pub struct CodeSigner {
    codesign: PathBuf,
    timeout: Duration,
}

impl CodeSigner {
    /// Creates a signer using the `codesign` binary at `codesign`.
    pub fn new(codesign: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            codesign: codesign.into(),
            timeout,
        }
    }

    /// Creates a signer from the configured tool path and timeout.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.tools().codesign, settings.tool_timeout())
    }

    /// Signs `bundle` recursively with the ad-hoc identity, replacing any
    /// existing signature.
    ///
    /// # Errors
    ///
    /// [`Error::Signing`] with captured stderr when `codesign` exits non-zero.
    pub async fn sign(&self, bundle: &Path) -> Result<()> {
        log::info!("Signing {}", bundle.display());

        let output = run_tool(
            &self.codesign,
            [
                OsStr::new("--force"),
                OsStr::new("--deep"),
                OsStr::new("--sign"),
                OsStr::new("-"),
                bundle.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        if !output.success() {
            let message = output.error_message();
            log::error!("Code signing failed: {}", message);
            return Err(Error::Signing(message));
        }

        log::info!("✓ Signed {}", bundle.display());
        Ok(())
    }

    /// Verifies the signature on `bundle`, including nested code.
    ///
    /// # Errors
    ///
    /// [`Error::Verification`] with captured stderr when `codesign` exits non-zero.
    pub async fn verify(&self, bundle: &Path) -> Result<()> {
        let output = run_tool(
            &self.codesign,
            [OsStr::new("--verify"), OsStr::new("--deep"), bundle.as_os_str()],
            self.timeout,
        )
        .await?;

        if !output.success() {
            let message = output.error_message();
            log::error!("Signature verification failed: {}", message);
            return Err(Error::Verification(message));
        }

        log::info!("✓ Signature verified");
        Ok(())
    }
}
