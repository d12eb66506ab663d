//! Target URL validation.

use std::fmt;
use url::Url;

/// Why user input is not an acceptable target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    /// Blank or whitespace-only input.
    #[error("URL cannot be empty")]
    Empty,

    /// Not parseable, or no host.
    #[error("Invalid URL format")]
    InvalidFormat,

    /// Any scheme other than `http` or `https`.
    #[error("Only HTTP and HTTPS URLs are supported")]
    UnsupportedScheme,
}

/// A validated `http`/`https` URL with a host.
///
/// Keeps the exact text it was validated from, so `https://example.com` does
/// not pick up the trailing slash the parsed form would add.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WebUrl {
    text: String,
    parsed: Url,
}

impl WebUrl {
    /// The validated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed form.
    pub fn url(&self) -> &Url {
        &self.parsed
    }

    /// Lowercase scheme, `http` or `https`.
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Host name. Always present after validation.
    pub fn host(&self) -> Option<&str> {
        self.parsed.host_str()
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for WebUrl {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for WebUrl {
    type Error = UrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl TryFrom<&str> for WebUrl {
    type Error = UrlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate(value)
    }
}

impl std::str::FromStr for WebUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl From<WebUrl> for String {
    fn from(value: WebUrl) -> Self {
        value.text
    }
}

/// Validates user input as a target URL.
///
/// Trims whitespace and prefixes `https://` when the input carries no scheme
/// separator. Only `http` and `https` with a host are accepted.
///
/// ```
/// use web2app::model::{validate, UrlError};
///
/// assert_eq!(validate("example.com").unwrap().as_str(), "https://example.com");
/// assert_eq!(validate("ftp://x").unwrap_err(), UrlError::UnsupportedScheme);
/// ```
pub fn validate(input: &str) -> Result<WebUrl, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let text = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&text).map_err(|_| UrlError::InvalidFormat)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme);
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::InvalidFormat);
    }

    Ok(WebUrl { text, parsed })
}
