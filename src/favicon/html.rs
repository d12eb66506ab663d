//! Icon reference extraction from HTML and web manifests.
//!
//! Markup is scanned with regular expressions rather than parsed; only
//! double-quoted attribute values are recognised.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// `<link rel="manifest" href="…">`, in either attribute order.
static MANIFEST_LINKS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<link[^>]*rel\s*=\s*"manifest"[^>]*href\s*=\s*"([^"]+)"[^>]*/?\s*>"#),
        Regex::new(r#"(?i)<link[^>]*href\s*=\s*"([^"]+)"[^>]*rel\s*=\s*"manifest"[^>]*/?\s*>"#),
    ]
    .map(|pattern| pattern.expect("manifest link pattern is valid"))
});

/// Any `<link>` whose `rel` mentions "icon".
static ICON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*rel\s*=\s*"[^"]*icon[^"]*"[^>]*>"#).expect("icon link pattern is valid")
});

static HREF_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*"([^"]+)""#).expect("href pattern is valid")
});

static SIZES_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)sizes\s*=\s*"([^"]+)""#).expect("sizes pattern is valid")
});

/// An icon reference and the pixel size used to rank it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconCandidate {
    pub href: String,
    pub size: u32,
}

impl IconCandidate {
    /// Rank for a link without a `sizes` attribute.
    pub const UNKNOWN_SIZE: u32 = 1;

    /// Rank for a vector icon without a `sizes` attribute.
    pub const SCALABLE_SIZE: u32 = 1024;
}

/// Reads the width from a `sizes` value such as `512x512`. Anything
/// unparseable is 0.
pub fn parse_declared_size(sizes: &str) -> u32 {
    sizes
        .to_lowercase()
        .split('x')
        .next()
        .and_then(|width| width.parse().ok())
        .unwrap_or(0)
}

/// Resolves an `href` against a site origin such as `https://example.com`.
pub fn resolve_href(href: &str, origin: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

/// The first web manifest reference in `html`.
pub fn manifest_href(html: &str) -> Option<&str> {
    MANIFEST_LINKS
        .iter()
        .find_map(|pattern| pattern.captures(html))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Icon `<link>` tags in `html`, largest first. Ties keep document order.
pub fn link_candidates(html: &str) -> Vec<IconCandidate> {
    let mut candidates: Vec<IconCandidate> = ICON_LINK
        .find_iter(html)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let href = attribute(&HREF_ATTRIBUTE, tag)?;

            let size = match attribute(&SIZES_ATTRIBUTE, tag) {
                Some(sizes) => parse_declared_size(sizes),
                None if tag.contains("svg") => IconCandidate::SCALABLE_SIZE,
                None => IconCandidate::UNKNOWN_SIZE,
            };

            Some(IconCandidate {
                href: href.to_string(),
                size,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.size.cmp(&a.size));
    candidates
}

#[derive(Deserialize)]
struct WebManifest {
    // Entries are read one by one so a single malformed icon is skipped
    // instead of failing the whole manifest.
    #[serde(default)]
    icons: Vec<Value>,
}

/// Icons listed in a web manifest, largest first.
///
/// Returns `None` if the bytes are not a JSON manifest object. Entries
/// without a string `src` are skipped; a missing or non-string `sizes`
/// ranks as 0.
pub fn manifest_candidates(manifest: &[u8]) -> Option<Vec<IconCandidate>> {
    let manifest: WebManifest = serde_json::from_slice(manifest).ok()?;

    let mut candidates: Vec<IconCandidate> = manifest
        .icons
        .iter()
        .filter_map(|icon| {
            let href = icon.get("src")?.as_str()?;
            let size = icon
                .get("sizes")
                .and_then(Value::as_str)
                .map_or(0, parse_declared_size);
            Some(IconCandidate {
                href: href.to_string(),
                size,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.size.cmp(&a.size));
    Some(candidates)
}

fn attribute<'a>(pattern: &Regex, tag: &'a str) -> Option<&'a str> {
    pattern
        .captures(tag)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
