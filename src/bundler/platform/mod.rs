//! Platform-specific bundle formats.
//!
//! Only macOS application bundles are produced. The module compiles on every
//! host so the pipeline can be exercised with stand-in tools.

pub mod macos;
