//! Which URLs belong in the sitemap, and in what form.

use url::Url;

use crate::error::SitemapError;

const SKIPPED_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip"];

/// Drop the fragment and one trailing `/`.
pub fn normalize_url(url: &str) -> String {
    let url = match url.split_once('#') {
        Some((base, _)) => base,
        None => url,
    };
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// `host[:port]`, with the port only when it is not the scheme default.
fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// URL rules bound to the site being crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRules {
    netloc: String,
}

impl UrlRules {
    pub fn for_site(start_url: &str) -> Result<Self, SitemapError> {
        let parsed = Url::parse(start_url)?;
        let netloc =
            netloc(&parsed).ok_or_else(|| SitemapError::MissingHost(start_url.to_string()))?;
        Ok(Self { netloc })
    }

    /// Same host as the site, http(s), and not a known binary download.
    pub fn is_valid_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        netloc(&parsed).as_deref() == Some(self.netloc.as_str())
            && matches!(parsed.scheme(), "http" | "https")
            && !SKIPPED_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
    }
}
