//! Web app descriptor.

use super::url::WebUrl;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Namespace prepended to every derived bundle identifier.
pub const BUNDLE_ID_PREFIX: &str = "com.web2app.";

/// Longest name-derived suffix kept in a bundle identifier.
const MAX_IDENTIFIER_SUFFIX: usize = 50;

/// One website turned (or to be turned) into an app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebApp {
    /// Stable identity, unchanged across edits.
    pub id: Uuid,
    /// Display name; also the bundle file name once sanitized.
    pub name: String,
    /// Page the launcher opens.
    pub url: WebUrl,
    /// Reverse-domain bundle identifier.
    pub bundle_identifier: String,
    /// Raw icon image bytes in any decodable format.
    pub icon: Option<Vec<u8>>,
    /// When the descriptor was first created.
    pub created_at: DateTime<Utc>,
    /// Where the last generated bundle lives.
    pub generated_path: Option<PathBuf>,
    /// Domains the launcher may navigate to besides the URL's own host.
    pub allowed_domains: Vec<String>,
}

impl WebApp {
    /// Creates a descriptor with a fresh id, the current time and a bundle
    /// identifier derived from `name`.
    pub fn new(name: impl Into<String>, url: WebUrl) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            bundle_identifier: derive_bundle_identifier(&name),
            name,
            url,
            icon: None,
            created_at: Utc::now(),
            generated_path: None,
            allowed_domains: Vec::new(),
        }
    }

    /// Replaces the derived bundle identifier.
    pub fn with_bundle_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.bundle_identifier = identifier.into();
        self
    }

    /// Sets the icon bytes.
    pub fn with_icon(mut self, icon: Option<Vec<u8>>) -> Self {
        self.icon = icon;
        self
    }

    /// Sets the extra allowed domains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = domains;
        self
    }

    /// Host of the target URL.
    pub fn hostname(&self) -> &str {
        self.url.host().unwrap_or_else(|| self.url.as_str())
    }
}

/// Derives `com.web2app.<slug>` from a display name.
///
/// The slug is the lowercased name with spaces turned into `-` and everything
/// except letters, digits and `-` dropped, cut to 50 characters. A name with
/// nothing usable gets eight random hex characters instead.
pub fn derive_bundle_identifier(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    let slug = if slug.is_empty() {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    } else {
        slug
    };

    let slug: String = slug.chars().take(MAX_IDENTIFIER_SUFFIX).collect();
    format!("{BUNDLE_ID_PREFIX}{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate;

    #[test]
    fn identifier_from_plain_name() {
        assert_eq!(derive_bundle_identifier("TestApp"), "com.web2app.testapp");
        assert_eq!(derive_bundle_identifier("Hacker News"), "com.web2app.hacker-news");
        assert_eq!(derive_bundle_identifier("Mail (Work)!"), "com.web2app.mail-work");
    }

    #[test]
    fn identifier_is_truncated() {
        let long = "a".repeat(80);
        let id = derive_bundle_identifier(&long);
        assert_eq!(id.len(), BUNDLE_ID_PREFIX.len() + 50);
    }

    #[test]
    fn unusable_name_gets_random_suffix() {
        let id = derive_bundle_identifier("!!!");
        let suffix = id.strip_prefix(BUNDLE_ID_PREFIX).unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn new_descriptor_defaults() {
        let app = WebApp::new("Test App", validate("example.com").unwrap());
        assert_eq!(app.bundle_identifier, "com.web2app.test-app");
        assert_eq!(app.hostname(), "example.com");
        assert!(app.icon.is_none());
        assert!(app.allowed_domains.is_empty());

        let explicit = app.with_bundle_identifier("org.example.custom");
        assert_eq!(explicit.bundle_identifier, "org.example.custom");
    }
}
