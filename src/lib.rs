//! Turn websites into standalone macOS apps.
//!
//! This library provides:
//! - [`favicon`] - icon discovery for a site
//! - [`bundler`] - `.app` generation: skeleton, plists, icon, signing, quarantine
//! - [`store`] - the persisted list of web app descriptors
//! - [`launcher`] - the runtime configuration reader used by generated apps
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod favicon;
pub mod launcher;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use error::{CliError, Result, Web2AppError};
