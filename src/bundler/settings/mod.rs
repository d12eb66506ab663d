//! Configuration structures for package generation.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! the optional `settings.toml` in the data directory, and explicit builder
//! calls (the CLI flags).

mod builder;
mod core;
mod file;
mod tools;

// Re-export all public types
pub use builder::{
    DEFAULT_FAVICON_API, DEFAULT_TOOL_TIMEOUT, DEFAULT_USER_AGENT, LAUNCHER_EXECUTABLE,
    SettingsBuilder,
};
pub use core::Settings;
pub use file::{SETTINGS_FILE_NAME, SettingsFile, ToolOverrides};
pub use tools::ToolPaths;
