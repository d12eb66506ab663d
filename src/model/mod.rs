//! Web app descriptors and input validation.

mod url;
mod webapp;

pub use self::url::{UrlError, WebUrl, validate};
pub use webapp::{BUNDLE_ID_PREFIX, WebApp, derive_bundle_identifier};
