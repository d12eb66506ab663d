//! Bundle generation and coordination.
//!
//! - [`orchestrator`] - the [`PackageGenerator`] pipeline
//! - [`signing`] - ad-hoc signing and verification via `codesign`
//! - [`tool_detection`] - external tool availability checking
//! - [`locks`] - per-name mutual exclusion for concurrent generations

mod locks;
mod orchestrator;
mod signing;
mod tool_detection;

pub use locks::NameLocks;
pub use orchestrator::PackageGenerator;
pub use signing::CodeSigner;
pub use tool_detection::{check_tools, tool_available};
