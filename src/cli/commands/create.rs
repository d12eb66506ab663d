//! `create` command.

use super::{CommandContext, preflight, read_icon};
use crate::{
    cli::args::CreateArgs,
    error::Result,
    model::{WebApp, validate},
};

/// Validates input, finds an icon, builds the bundle and records the app.
///
/// Nothing is recorded if generation fails.
pub async fn create(context: &CommandContext, args: &CreateArgs) -> Result<i32> {
    let url = validate(&args.url)?;

    let mut app = WebApp::new(args.name.trim(), url).with_allowed_domains(args.allowed_domains.clone());
    if let Some(bundle_id) = &args.bundle_id {
        app = app.with_bundle_identifier(bundle_id);
    }

    app.icon = match &args.icon {
        Some(path) => Some(read_icon(context, path).await?),
        None if args.no_fetch_icon => None,
        None => context.discover_icon(&app.url).await?,
    };

    let mut store = context.open_store().await?;

    if !args.no_generate {
        preflight(context)?;
        context.output().progress(&format!("Generating {}", app.name))?;
        let bundle = context.generator().generate(&app).await?;
        context.output().success(&format!("Created {}", bundle.display()))?;
        app.generated_path = Some(bundle);
    }

    let id = app.id;
    store.add(app).await?;
    context.output().indent(&format!("id {id}"))?;
    Ok(0)
}
