//! Quarantine attribute removal.
//!
//! Gatekeeper blocks bundles carrying `com.apple.quarantine`. The attribute is
//! cleared in two ways:
//! - directly on every entry via `removexattr` (works inside the sandbox
//!   container),
//! - through `xattr -dr` for bundles in shared locations such as
//!   `/Applications`, where the direct call may be refused.
//!
//! Both are best-effort: failures are logged, never raised.

use crate::bundler::utils::process::run_tool;
use std::{ffi::OsStr, path::Path, time::Duration};

/// Extended attribute set on network-downloaded content.
pub const QUARANTINE_ATTRIBUTE: &str = "com.apple.quarantine";

/// Outcome of a direct removal pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Entries the attribute was removed from.
    pub cleared: usize,
    /// Entries where the OS refused access.
    pub denied: usize,
}

/// Removes the quarantine attribute from `bundle` and everything below it,
/// without following symlinks.
pub fn remove_quarantine(bundle: &Path) -> RemovalSummary {
    let mut summary = RemovalSummary::default();

    for entry in walkdir::WalkDir::new(bundle).follow_links(false) {
        match entry {
            Ok(entry) => remove_attribute(entry.path(), &mut summary),
            Err(e) => log::debug!("Skipping unreadable entry while clearing quarantine: {}", e),
        }
    }

    log::debug!(
        "Quarantine pass on {}: {} cleared, {} denied",
        bundle.display(),
        summary.cleared,
        summary.denied
    );
    summary
}

#[cfg(unix)]
fn remove_attribute(path: &Path, summary: &mut RemovalSummary) {
    match xattr::get(path, QUARANTINE_ATTRIBUTE) {
        Ok(None) => {}
        Ok(Some(_)) => match xattr::remove(path, QUARANTINE_ATTRIBUTE) {
            Ok(()) => summary.cleared += 1,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => summary.denied += 1,
            Err(e) => log::debug!("Could not clear quarantine on {}: {}", path.display(), e),
        },
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => summary.denied += 1,
        // Filesystems without extended attribute support land here.
        Err(e) => log::debug!("Could not read attributes of {}: {}", path.display(), e),
    }
}

#[cfg(not(unix))]
fn remove_attribute(_path: &Path, _summary: &mut RemovalSummary) {}

/// Runs `xattr -dr com.apple.quarantine <bundle>`.
///
/// Logs and returns `false` on any failure, including a missing tool.
pub async fn remove_quarantine_with_tool(xattr_tool: &Path, bundle: &Path, timeout: Duration) -> bool {
    let args = [
        OsStr::new("-dr"),
        OsStr::new(QUARANTINE_ATTRIBUTE),
        bundle.as_os_str(),
    ];

    match run_tool(xattr_tool, args, timeout).await {
        Ok(output) if output.success() => {
            log::debug!("xattr cleared quarantine on {}", bundle.display());
            true
        }
        Ok(output) => {
            log::warn!(
                "xattr could not clear quarantine on {}: {}",
                bundle.display(),
                output.error_message()
            );
            false
        }
        Err(e) => {
            log::warn!("xattr fallback unavailable for {}: {}", bundle.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tree_reports_nothing_cleared() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("A.app/Contents/MacOS")).unwrap();
        std::fs::write(dir.path().join("A.app/Contents/MacOS/bin"), b"x").unwrap();

        let summary = remove_quarantine(&dir.path().join("A.app"));
        assert_eq!(summary, RemovalSummary::default());
    }

    #[tokio::test]
    async fn missing_tool_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cleared = remove_quarantine_with_tool(
            &dir.path().join("no-such-xattr"),
            dir.path(),
            Duration::from_secs(5),
        )
        .await;
        assert!(!cleared);
    }
}
