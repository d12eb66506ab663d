//! Error types for package generation.
//!
//! Every step of the bundle pipeline surfaces one of these variants. External
//! tool failures are split by tool so callers can tell an icon packaging
//! failure from a signing or verification failure.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

/// Result type alias for bundle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a web app bundle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {source}", .path.display())]
    Fs {
        /// What was being attempted.
        context: &'static str,
        /// Path the operation touched.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// A resized icon variant could not be encoded as PNG.
    #[error("Failed to convert image to PNG at size {size}x{size}: {source}")]
    IconEncoding {
        /// Pixel edge length of the failing variant.
        size: u32,
        /// Encoder error.
        source: image::ImageError,
    },

    /// `iconutil` exited with a non-zero status.
    #[error("iconutil failed: {0}")]
    IconPackaging(String),

    /// `codesign --sign` exited with a non-zero status.
    #[error("Code signing failed: {0}")]
    Signing(String),

    /// `codesign --verify` exited with a non-zero status.
    #[error("Signature verification failed: {0}")]
    Verification(String),

    /// An external tool could not be started at all.
    #[error("Failed to launch {tool}: {source}")]
    ToolLaunch {
        /// Tool name as configured.
        tool: String,
        /// Spawn error.
        source: io::Error,
    },

    /// An external tool did not exit within the configured wait.
    #[error("{tool} did not finish within {} seconds", .timeout.as_secs_f32())]
    ToolTimeout {
        /// Tool name as configured.
        tool: String,
        /// Wait that elapsed.
        timeout: Duration,
    },

    /// Property list serialization failed.
    #[error("Property list error: {0}")]
    Plist(#[from] plist::Error),

    /// Anything else, described in text.
    #[error("{0}")]
    GenericError(String),
}

/// Attaches path context to raw IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Adds a human readable context message to errors and missing values.
pub trait Context<T> {
    /// Wraps the failure with a fixed message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)).into())
    };
}
