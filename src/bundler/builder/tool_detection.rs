//! External tool availability checking.
//!
//! Generation needs `iconutil`, `codesign` and `xattr`. Missing tools are
//! reported up front so the user sees one clear warning instead of a launch
//! failure halfway through the pipeline.

use crate::bundler::Settings;
use std::path::Path;

/// Returns `true` if `program` resolves to an executable, either as a path or
/// through `PATH`.
pub fn tool_available(program: &Path) -> bool {
    match which::which(program) {
        Ok(resolved) => {
            log::debug!("Found {} at {}", program.display(), resolved.display());
            true
        }
        Err(e) => {
            log::debug!("{} not found: {}", program.display(), e);
            false
        }
    }
}

/// Checks every configured tool and the launcher binary.
///
/// Returns the names of whatever is missing. Each gap is logged as a warning;
/// the caller decides whether to continue.
pub fn check_tools(settings: &Settings) -> Vec<&'static str> {
    let mut missing = Vec::new();

    for (name, path) in settings.tools().iter() {
        if !tool_available(path) {
            log::warn!(
                "{} not available at {}. Bundle generation will fail at that step.",
                name,
                path.display()
            );
            missing.push(name);
        }
    }

    if !settings.launcher_binary().is_file() {
        log::warn!(
            "Launcher executable not found at {}. Build it or pass --launcher.",
            settings.launcher_binary().display()
        );
        missing.push("launcher");
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{SettingsBuilder, ToolPaths};

    #[test]
    fn reports_missing_tools_and_launcher() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .data_directory(dir.path())
            .tools(ToolPaths {
                iconutil: dir.path().join("iconutil"),
                codesign: dir.path().join("codesign"),
                xattr: dir.path().join("xattr"),
            })
            .build()
            .unwrap();

        assert_eq!(
            check_tools(&settings),
            ["iconutil", "codesign", "xattr", "launcher"]
        );
    }
}
