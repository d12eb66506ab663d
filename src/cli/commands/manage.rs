//! `list`, `update`, `delete` and `regenerate`.

use super::{CommandContext, find_app, preflight, read_icon};
use crate::{cli::args::UpdateArgs, error::Result, model::validate};

/// Prints every stored app in display order.
pub async fn list(context: &CommandContext) -> Result<i32> {
    let store = context.open_store().await?;
    let output = context.output();

    if store.apps().is_empty() {
        output.println("No web apps yet. Create one with `web2app create <name> <url>`.")?;
        return Ok(0);
    }

    output.section(&format!("{} web app(s)", store.apps().len()))?;
    for app in store.apps() {
        let id = app.id.simple().to_string();
        output.println(&format!("{}  {}  {}", &id[..8], app.name, app.url))?;
        match &app.generated_path {
            Some(path) => output.indent(&path.display().to_string())?,
            None => output.indent("(not generated)")?,
        }
    }
    Ok(0)
}

/// Applies edits and, unless told otherwise, rebuilds the bundle.
pub async fn update(context: &CommandContext, args: &UpdateArgs) -> Result<i32> {
    let mut store = context.open_store().await?;
    let mut app = find_app(&store, &args.app)?;

    if let Some(name) = &args.name {
        app.name = name.trim().to_string();
    }
    if let Some(url) = &args.url {
        app.url = validate(url)?;
    }
    if let Some(path) = &args.icon {
        app.icon = Some(read_icon(context, path).await?);
    } else if args.fetch_icon {
        app.icon = context.discover_icon(&app.url).await?;
    }
    if args.clear_domains {
        app.allowed_domains.clear();
    } else if !args.allowed_domains.is_empty() {
        app.allowed_domains = args.allowed_domains.clone();
    }

    if !args.no_regenerate {
        preflight(context)?;
        context.output().progress(&format!("Regenerating {}", app.name))?;
        let bundle = context.generator().regenerate(&app).await?;
        context.output().success(&format!("Updated {}", bundle.display()))?;
        app.generated_path = Some(bundle);
    }

    store.update(app).await?;
    Ok(0)
}

/// Removes the app record and its bundle.
pub async fn delete(context: &CommandContext, key: &str) -> Result<i32> {
    let mut store = context.open_store().await?;
    let app = find_app(&store, key)?;

    let removed = store.delete(app.id).await?;
    context.output().success(&format!("Deleted {}", removed.name))?;
    Ok(0)
}

/// Rebuilds the bundle of an unchanged app.
pub async fn regenerate(context: &CommandContext, key: &str) -> Result<i32> {
    let mut store = context.open_store().await?;
    let mut app = find_app(&store, key)?;

    preflight(context)?;
    let bundle = context.generator().regenerate(&app).await?;
    context.output().success(&format!("Regenerated {}", bundle.display()))?;

    app.generated_path = Some(bundle);
    store.update(app).await?;
    Ok(0)
}
