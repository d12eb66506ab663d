//! Bounded external tool execution.
//!
//! Every external tool the pipeline calls (`iconutil`, `codesign`, `xattr`)
//! goes through [`run_tool`], which captures both output streams and enforces
//! a wait limit. A timed out child is killed and reaped before the error is
//! returned.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsStr,
    path::Path,
    process::{ExitStatus, Stdio},
    time::Duration,
};
use tokio::process::Command;

/// Captured result of a finished tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit status of the child.
    pub status: ExitStatus,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl ToolOutput {
    /// Returns `true` when the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Standard error text, or a placeholder when the tool printed nothing.
    pub fn error_message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exited with {}", self.status)
        } else {
            stderr.to_string()
        }
    }
}

/// Runs `program` with `args`, waiting at most `timeout` for it to exit.
///
/// Non-zero exit is NOT an error here; callers map it to their own error kind.
pub async fn run_tool<I, S>(program: &Path, args: I, timeout: Duration) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.display().to_string();
    log::debug!("Running {}", tool);

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::ToolLaunch {
            tool: tool.clone(),
            source,
        })?;

    // Dropping the timed out future drops the child, and kill_on_drop kills it.
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => return Err(Error::ToolLaunch { tool, source }),
        Err(_elapsed) => {
            log::warn!(
                "{} timed out after {:.1}s, terminating process",
                tool,
                timeout.as_secs_f32()
            );
            return Err(Error::ToolTimeout { tool, timeout });
        }
    };

    Ok(ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
