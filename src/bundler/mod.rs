//! Web app bundle generation.
//!
//! Turns a [`WebApp`](crate::model::WebApp) descriptor into a signed,
//! launchable macOS `.app`:
//!
//! 1. remove any stale bundle with the same name
//! 2. build the directory skeleton
//! 3. copy the launcher executable
//! 4. write `Info.plist` and `config.plist`
//! 5. render and package the icon, if one is available
//! 6. sign, then verify
//! 7. clear the quarantine attribute
//!
//! # Example
//!
//! ```no_run
//! use web2app::bundler::{PackageGenerator, SettingsBuilder};
//! use web2app::model::{WebApp, validate};
//!
//! # async fn example() -> web2app::error::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .data_directory("/tmp/web2app")
//!     .build()?;
//!
//! let app = WebApp::new("Hacker News", validate("news.ycombinator.com")?);
//! let generator = PackageGenerator::new(settings);
//! let bundle = generator.generate(&app).await?;
//! println!("Created {}", bundle.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{CodeSigner, PackageGenerator, check_tools};
pub use error::{Error, Result};
pub use platform::macos::removal::{DeletionGuard, RemovalOutcome};
pub use settings::{Settings, SettingsBuilder, ToolPaths};
