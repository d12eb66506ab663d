//! Favicon discovery.
//!
//! Finds the best available icon for a site by trying, in order:
//!
//! 1. icons listed in the web manifest linked from the home page
//! 2. the largest `<link rel="…icon…">` on the home page
//! 3. `/apple-touch-icon-precomposed.png`, then `/apple-touch-icon.png`
//! 4. a third-party favicon resolver, if configured
//! 5. `/favicon.ico`
//!
//! Probes run one after another and stop at the first usable icon. Nothing in
//! here fails loudly: every error is logged and the next source is tried.

pub mod html;

use crate::bundler::Settings;
use html::{IconCandidate, link_candidates, manifest_candidates, manifest_href, resolve_href};
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use std::{fmt, time::Duration};
use url::Url;

/// Downloads from ranked candidates must be larger than this to count;
/// smaller files are usually 16 px placeholders.
pub const MIN_ICON_BYTES: usize = 500;

/// Site-relative paths of Apple touch icons, in probe order.
pub const TOUCH_ICON_PATHS: [&str; 2] = ["/apple-touch-icon-precomposed.png", "/apple-touch-icon.png"];

const REQUEST_TIMEOUT_SECS: u64 = 20;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Stateless icon discovery service. Cheap to clone; each call owns its state.
#[derive(Clone, Debug)]
pub struct FaviconFetcher {
    client: Client,
    api_template: Option<String>,
}

impl FaviconFetcher {
    /// Builds a fetcher with its own HTTP client.
    ///
    /// `api_template` is a resolver URL with a `{host}` placeholder, or `None`
    /// to skip that source.
    pub fn new(user_agent: &str, api_template: Option<String>) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if let Ok(agent) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self::with_client(client, api_template))
    }

    /// Builds a fetcher from the configured user agent and resolver.
    pub fn from_settings(settings: &Settings) -> reqwest::Result<Self> {
        Self::new(
            settings.user_agent(),
            settings.favicon_api().map(str::to_string),
        )
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client, api_template: Option<String>) -> Self {
        Self {
            client,
            api_template,
        }
    }

    /// Returns the best icon found for `site`, or `None` if every source failed.
    pub async fn fetch(&self, site: &Url) -> Option<Vec<u8>> {
        let host = site.host_str()?;
        let origin = origin(site)?;

        // Both page-based strategies share one download of the home page.
        let page = self.fetch_page(&origin).await;

        if let Some(page) = &page {
            if let Some(icon) = self.fetch_from_manifest(page, &origin).await {
                log::info!("Fetched icon via {} for {}", Strategy::Manifest, host);
                return Some(icon);
            }
            let links = link_candidates(page);
            if let Some(icon) = self.try_candidates(Strategy::LinkTag, links, &origin).await {
                log::info!("Fetched icon via {} for {}", Strategy::LinkTag, host);
                return Some(icon);
            }
        }

        for path in TOUCH_ICON_PATHS {
            let touch_url = format!("{origin}{path}");
            if let Some(icon) = self.download(Strategy::TouchIcon, &touch_url).await {
                log::info!("Fetched {} for {}", path, host);
                return Some(icon);
            }
        }

        if let Some(template) = &self.api_template {
            let api_url = template.replace("{host}", host);
            if let Some(icon) = self.download(Strategy::ResolverApi, &api_url).await {
                log::info!("Fetched icon via {} for {}", Strategy::ResolverApi, host);
                return Some(icon);
            }
        }

        let ico_url = format!("{origin}/favicon.ico");
        if let Some(icon) = self.download(Strategy::FaviconIco, &ico_url).await {
            log::info!("Fetched favicon.ico for {}", host);
            return Some(icon);
        }

        log::info!("No icon found for {}", host);
        None
    }

    async fn fetch_from_manifest(&self, page: &str, origin: &str) -> Option<Vec<u8>> {
        let manifest_url = resolve_href(manifest_href(page)?, origin);
        let manifest = self.download(Strategy::Manifest, &manifest_url).await?;
        let candidates = manifest_candidates(&manifest)?;
        self.try_candidates(Strategy::Manifest, candidates, origin).await
    }

    async fn try_candidates(
        &self,
        strategy: Strategy,
        candidates: Vec<IconCandidate>,
        origin: &str,
    ) -> Option<Vec<u8>> {
        for candidate in candidates {
            let url = resolve_href(&candidate.href, origin);
            match self.download(strategy, &url).await {
                Some(icon) if icon.len() > MIN_ICON_BYTES => return Some(icon),
                Some(icon) => {
                    log::debug!("[{}] Skipping {} ({} bytes)", strategy, url, icon.len())
                }
                None => {}
            }
        }
        None
    }

    /// Home page HTML. The status code is not checked; error pages can still
    /// carry icon links.
    async fn fetch_page(&self, origin: &str) -> Option<String> {
        let response = match self.client.get(origin).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Could not load {}: {}", origin, e);
                return None;
            }
        };
        let body = response.bytes().await.ok()?;
        String::from_utf8(body.to_vec()).ok()
    }

    /// Body of a successful, non-empty response.
    async fn download(&self, strategy: Strategy, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("[{}] Download failed for {}: {}", strategy, url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::debug!(
                "[{}] Download failed for {}: HTTP {}",
                strategy,
                url,
                response.status()
            );
            return None;
        }

        match response.bytes().await {
            Ok(body) if !body.is_empty() => Some(body.to_vec()),
            Ok(_) => None,
            Err(e) => {
                log::debug!("[{}] Download failed for {}: {}", strategy, url, e);
                None
            }
        }
    }
}

/// Discovery source, named in log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    Manifest,
    LinkTag,
    TouchIcon,
    ResolverApi,
    FaviconIco,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manifest => "web manifest",
            Self::LinkTag => "HTML link tag",
            Self::TouchIcon => "touch icon",
            Self::ResolverApi => "favicon API",
            Self::FaviconIco => "favicon.ico",
        })
    }
}

/// `scheme://host[:port]` of `site`.
fn origin(site: &Url) -> Option<String> {
    let host = site.host_str()?;
    Some(match site.port() {
        Some(port) => format!("{}://{}:{}", site.scheme(), host, port),
        None => format!("{}://{}", site.scheme(), host),
    })
}
