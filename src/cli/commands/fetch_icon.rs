//! `fetch-icon` command.

use super::CommandContext;
use crate::{
    error::{CliError, Result},
    model::validate,
};
use std::path::Path;

/// Discovers the icon for `url` and writes it to `file`.
pub async fn fetch_icon(context: &CommandContext, url: &str, file: &Path) -> Result<i32> {
    let url = validate(url)?;

    let Some(icon) = context.discover_icon(&url).await? else {
        return Err(CliError::ExecutionFailed {
            command: "fetch-icon".to_string(),
            reason: format!("no icon found for {url}"),
        }
        .into());
    };

    tokio::fs::write(file, &icon).await?;
    context
        .output()
        .success(&format!("Saved {} ({} bytes)", file.display(), icon.len()))?;
    Ok(0)
}
