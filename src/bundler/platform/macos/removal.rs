//! Guarded removal of previously generated bundles.
//!
//! Stored bundle paths come from a user-editable JSON file. Before anything is
//! deleted the path must end in `.app` and, once normalized, sit below one of
//! the allowed roots. Anything else is refused and logged; removal never
//! raises because it is cleanup, not part of generation.

use super::structure::BUNDLE_EXTENSION;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Why a removal request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    /// The path does not carry the `.app` extension.
    NotABundle,
    /// The normalized path is outside every allowed root.
    OutsideAllowedRoots(PathBuf),
    /// The path could not be normalized.
    Unresolvable,
}

/// Result of a removal attempt.
#[derive(Debug)]
pub enum RemovalOutcome {
    /// The bundle was deleted.
    Removed(PathBuf),
    /// Nothing existed at the path.
    Missing(PathBuf),
    /// The guard refused the path.
    Refused(Refusal),
    /// Deletion was attempted and failed.
    Failed(std::io::Error),
}

/// Confines bundle deletion to a set of root directories.
#[derive(Clone, Debug)]
pub struct DeletionGuard {
    allowed_roots: Vec<PathBuf>,
}

impl DeletionGuard {
    /// Creates a guard for the given roots. Roots are normalized up front.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let allowed_roots = roots
            .into_iter()
            .filter_map(|root| root.as_ref().absolutize().ok().map(|p| p.into_owned()))
            .collect();
        Self { allowed_roots }
    }

    /// Standard roots: the private data directory, the user's home directory
    /// and the shared applications directory.
    pub fn for_settings(settings: &crate::bundler::Settings) -> Self {
        let mut roots = vec![settings.data_directory().to_path_buf()];
        if let Some(home) = dirs::home_dir() {
            roots.push(home);
        }
        roots.push(settings.applications_directory().to_path_buf());
        Self::new(roots)
    }

    /// Roots this guard accepts.
    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.allowed_roots
    }

    /// Decides whether `path` may be deleted. Returns the normalized path.
    pub fn check(&self, path: &Path) -> Result<PathBuf, Refusal> {
        let normalized = path
            .absolutize()
            .map_err(|_| Refusal::Unresolvable)?
            .into_owned();

        if normalized.extension().and_then(|e| e.to_str()) != Some(BUNDLE_EXTENSION) {
            return Err(Refusal::NotABundle);
        }

        let confined = self
            .allowed_roots
            .iter()
            .any(|root| normalized.starts_with(root) && normalized != *root);
        if !confined {
            return Err(Refusal::OutsideAllowedRoots(normalized));
        }

        Ok(normalized)
    }

    /// Deletes the bundle at `path` if the guard allows it.
    pub async fn remove(&self, path: &Path) -> RemovalOutcome {
        let normalized = match self.check(path) {
            Ok(normalized) => normalized,
            Err(refusal) => {
                match &refusal {
                    Refusal::NotABundle => {
                        log::error!("Refusing to delete non-.app path: {}", path.display())
                    }
                    _ => log::error!(
                        "Refusing to delete app outside expected directory: {}",
                        path.display()
                    ),
                }
                return RemovalOutcome::Refused(refusal);
            }
        };

        // symlink_metadata so a symlinked bundle is unlinked, not followed.
        let metadata = match tokio::fs::symlink_metadata(&normalized).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No generated app at {}", normalized.display());
                return RemovalOutcome::Missing(normalized);
            }
            Err(e) => {
                log::error!("Failed to inspect {}: {}", normalized.display(), e);
                return RemovalOutcome::Failed(e);
            }
        };

        let result = if metadata.is_dir() {
            tokio::fs::remove_dir_all(&normalized).await
        } else {
            tokio::fs::remove_file(&normalized).await
        };

        match result {
            Ok(()) => {
                log::info!("Deleted generated app at {}", normalized.display());
                RemovalOutcome::Removed(normalized)
            }
            Err(e) => {
                log::error!("Failed to delete generated app: {}", e);
                RemovalOutcome::Failed(e)
            }
        }
    }
}
