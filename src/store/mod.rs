//! Persistent list of web app descriptors.
//!
//! The list lives in one JSON file (see [`schema`]) inside the data
//! directory. Every mutation rewrites the whole file through a temporary
//! sibling and a rename, so readers never see a half-written document.

pub mod schema;

use crate::bundler::{DeletionGuard, RemovalOutcome};
use crate::model::WebApp;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Errors raised by the descriptor store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the schema.
    #[error("Malformed store document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was written by an incompatible release.
    #[error("Unsupported store version {0}")]
    UnsupportedVersion(u32),

    /// A record parsed but holds unusable values.
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: Uuid, reason: String },

    /// No descriptor with this id.
    #[error("No web app with id {0}")]
    NotFound(Uuid),
}

fn io_error(context: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io {
        context,
        path,
        source,
    }
}

/// Ordered descriptor collection backed by a JSON file.
#[derive(Debug)]
pub struct WebAppStore {
    path: PathBuf,
    apps: Vec<WebApp>,
    guard: DeletionGuard,
}

impl WebAppStore {
    /// Loads the store at `path`. A missing file is an empty store.
    ///
    /// `guard` decides which generated bundles deletions may remove.
    pub async fn open(path: impl Into<PathBuf>, guard: DeletionGuard) -> Result<Self, StoreError> {
        let path = path.into();

        let apps = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let apps = schema::decode(&bytes)?;
                log::info!("Loaded {} web app(s)", apps.len());
                apps
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No existing data file found; starting with empty list");
                Vec::new()
            }
            Err(e) => return Err(io_error("reading store", &path)(e)),
        };

        Ok(Self { path, apps, guard })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All descriptors in display order.
    pub fn apps(&self) -> &[WebApp] {
        &self.apps
    }

    /// Looks a descriptor up by id.
    pub fn get(&self, id: Uuid) -> Option<&WebApp> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// Looks a descriptor up by id, id prefix or case-insensitive name.
    pub fn find(&self, key: &str) -> Option<&WebApp> {
        if let Ok(id) = key.parse::<Uuid>() {
            return self.get(id);
        }

        let key_lower = key.to_lowercase();
        self.apps
            .iter()
            .find(|app| app.name.to_lowercase() == key_lower)
            .or_else(|| {
                let mut by_prefix = self
                    .apps
                    .iter()
                    .filter(|app| app.id.to_string().starts_with(&key_lower));
                // Ambiguous prefixes match nothing.
                match (by_prefix.next(), by_prefix.next()) {
                    (Some(app), None) if !key_lower.is_empty() => Some(app),
                    _ => None,
                }
            })
    }

    /// Appends a descriptor and saves.
    pub async fn add(&mut self, app: WebApp) -> Result<(), StoreError> {
        self.apps.push(app);
        self.save().await
    }

    /// Replaces the descriptor with the same id and saves.
    ///
    /// Returns `false` without touching the file when the id is unknown.
    pub async fn update(&mut self, app: WebApp) -> Result<bool, StoreError> {
        let Some(slot) = self.apps.iter_mut().find(|existing| existing.id == app.id) else {
            log::debug!("Ignoring update for unknown web app {}", app.id);
            return Ok(false);
        };
        *slot = app;
        self.save().await?;
        Ok(true)
    }

    /// Removes a descriptor and, best-effort, its generated bundle.
    pub async fn delete(&mut self, id: Uuid) -> Result<WebApp, StoreError> {
        let index = self
            .apps
            .iter()
            .position(|app| app.id == id)
            .ok_or(StoreError::NotFound(id))?;

        self.remove_generated_app(index).await;
        let removed = self.apps.remove(index);
        self.save().await?;
        Ok(removed)
    }

    /// Removes the descriptors at `offsets` and their bundles. Out of range
    /// offsets are ignored.
    pub async fn delete_at(&mut self, offsets: &[usize]) -> Result<Vec<WebApp>, StoreError> {
        let mut offsets: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|&i| i < self.apps.len())
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        for &index in &offsets {
            self.remove_generated_app(index).await;
        }

        let mut removed: Vec<WebApp> = offsets
            .iter()
            .rev()
            .map(|&index| self.apps.remove(index))
            .collect();
        removed.reverse();

        self.save().await?;
        Ok(removed)
    }

    /// Moves the descriptors at `offsets` so they sit, in their current
    /// relative order, just before the element now at `destination`.
    ///
    /// `destination` may equal the length to move to the end.
    pub async fn move_app(&mut self, offsets: &[usize], destination: usize) -> Result<(), StoreError> {
        move_offsets(&mut self.apps, offsets, destination);
        self.save().await
    }

    async fn remove_generated_app(&self, index: usize) {
        let Some(path) = self.apps[index].generated_path.as_deref() else {
            return;
        };
        if let RemovalOutcome::Refused(refusal) = self.guard.remove(path).await {
            log::debug!("Kept {} ({:?})", path.display(), refusal);
        }
    }

    async fn save(&self) -> Result<(), StoreError> {
        if let Some(directory) = self.path.parent() {
            tokio::fs::create_dir_all(directory)
                .await
                .map_err(io_error("creating storage directory", directory))?;
        }

        let bytes = schema::encode(&self.apps)?;

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, &bytes)
            .await
            .map_err(io_error("writing", &staging))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(io_error("replacing", &self.path))?;

        log::info!("Saved {} web app(s)", self.apps.len());
        Ok(())
    }
}

fn move_offsets<T>(items: &mut Vec<T>, offsets: &[usize], destination: usize) {
    let mut offsets: Vec<usize> = offsets
        .iter()
        .copied()
        .filter(|&i| i < items.len())
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    let destination = destination.min(items.len());
    let before = offsets.iter().filter(|&&i| i < destination).count();

    let mut moved: Vec<T> = offsets.iter().rev().map(|&i| items.remove(i)).collect();
    moved.reverse();

    let at = destination - before;
    items.splice(at..at, moved);
}
