//! Command line interface for web2app.

pub mod args;
pub mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::CommandContext;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point. Returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    if let Err(reason) = args.validate() {
        OutputManager::new(false).error(&reason)?;
        return Ok(2);
    }

    let context = CommandContext::from_args(&args)?;
    log::debug!("Using data directory {}", context.settings().data_directory().display());

    match &args.command {
        Command::Create(create) => commands::create(&context, create).await,
        Command::List => commands::list(&context).await,
        Command::Update(update) => commands::update(&context, update).await,
        Command::Delete { app } => commands::delete(&context, app).await,
        Command::Regenerate { app } => commands::regenerate(&context, app).await,
        Command::FetchIcon { url, file } => commands::fetch_icon(&context, url, file).await,
    }
}
