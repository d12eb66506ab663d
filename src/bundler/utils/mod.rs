//! Shared helpers for the bundle pipeline.

pub mod fs;
pub mod process;
