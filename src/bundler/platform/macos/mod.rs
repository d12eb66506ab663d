//! macOS `.app` bundle construction.
//!
//! Each submodule owns one step of the generation pipeline:
//!
//! - [`structure`] - name sanitization and the `Contents/{MacOS,Resources}` skeleton
//! - [`plist`] - `Info.plist` and launcher `config.plist`
//! - [`icon`] - iconset rasterization and `iconutil` packaging
//! - [`quarantine`] - `com.apple.quarantine` removal
//! - [`removal`] - guarded deletion of previously generated bundles

pub mod icon;
pub mod plist;
pub mod quarantine;
pub mod removal;
pub mod structure;
