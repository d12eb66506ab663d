//! Command line argument parsing and validation.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Turn websites into macOS apps
#[derive(Parser, Debug)]
#[command(
    name = "web2app",
    version,
    about = "Turn websites into macOS apps",
    long_about = "Creates signed, standalone macOS .app bundles that open a website in their own window.

Usage:
  web2app create \"Hacker News\" news.ycombinator.com
  web2app create Mail https://mail.example.com --allow-domain auth.example.com
  web2app list
  web2app update \"Hacker News\" --name HN
  web2app delete HN

Descriptors are stored in <data-dir>/webapps.json; bundles go to <data-dir>/GeneratedApps unless --output-dir is given."
)]
pub struct Args {
    /// Data directory holding webapps.json, settings.toml and generated apps
    #[arg(long, global = true, env = "WEB2APP_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Launcher executable copied into every bundle
    #[arg(long, global = true, env = "WEB2APP_LAUNCHER", value_name = "PATH")]
    pub launcher: Option<PathBuf>,

    /// Directory new bundles are written to
    #[arg(short = 'o', long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a web app and generate its bundle
    Create(CreateArgs),

    /// List stored web apps
    List,

    /// Edit a stored web app and regenerate its bundle
    Update(UpdateArgs),

    /// Delete a stored web app and its generated bundle
    Delete {
        /// Id, id prefix or name of the web app
        app: String,
    },

    /// Rebuild the bundle of a stored web app
    Regenerate {
        /// Id, id prefix or name of the web app
        app: String,
    },

    /// Discover a site's icon and save it to a file
    FetchIcon {
        /// Site address
        url: String,

        /// Where to write the icon
        #[arg(short = 'f', long, value_name = "FILE")]
        file: PathBuf,
    },
}

/// Arguments of `create`.
#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Display name
    pub name: String,

    /// Site address; `https://` is assumed when no scheme is given
    pub url: String,

    /// Icon image to use instead of discovering one
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Skip icon discovery
    #[arg(long, conflicts_with = "icon")]
    pub no_fetch_icon: bool,

    /// Extra domain the app may navigate to (repeatable)
    #[arg(long = "allow-domain", value_name = "DOMAIN")]
    pub allowed_domains: Vec<String>,

    /// Explicit bundle identifier
    #[arg(long, value_name = "ID")]
    pub bundle_id: Option<String>,

    /// Only record the web app; do not build a bundle
    #[arg(long)]
    pub no_generate: bool,
}

/// Arguments of `update`.
#[derive(ClapArgs, Debug)]
pub struct UpdateArgs {
    /// Id, id prefix or name of the web app
    pub app: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New site address
    #[arg(long)]
    pub url: Option<String>,

    /// New icon image
    #[arg(long, value_name = "FILE", conflicts_with = "fetch_icon")]
    pub icon: Option<PathBuf>,

    /// Discover the icon again
    #[arg(long)]
    pub fetch_icon: bool,

    /// Replace the extra allowed domains (repeatable)
    #[arg(long = "allow-domain", value_name = "DOMAIN")]
    pub allowed_domains: Vec<String>,

    /// Remove all extra allowed domains
    #[arg(long, conflicts_with = "allowed_domains")]
    pub clear_domains: bool,

    /// Save the changes without rebuilding the bundle
    #[arg(long)]
    pub no_regenerate: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Create(create) if create.name.trim().is_empty() => {
                Err("Name cannot be empty".to_string())
            }
            Command::Update(update)
                if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) =>
            {
                Err("Name cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}
