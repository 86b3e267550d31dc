//! Sitemap task configuration.
//!
//! Defaults, then the `[sitemap]` table of the config file, then
//! `WEBSITE_URL` / `MAX_PAGES` from the environment.

use std::time::Duration;

use batchbox_core::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const WEBSITE_URL_ENV: &str = "WEBSITE_URL";
pub const MAX_PAGES_ENV: &str = "MAX_PAGES";

pub const DEFAULT_WEBSITE_URL: &str = "https://example.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SitemapGenerator/1.0)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Where the crawl starts. Only URLs on the same host are followed.
    pub website_url: String,

    /// Upper bound on the number of pages recorded.
    pub max_pages: usize,

    /// Pause before following each link.
    pub request_delay_ms: u64,

    pub request_timeout_ms: u64,

    pub user_agent: String,

    /// `<priority>` written for every entry.
    pub priority: String,

    /// Written inside the output directory.
    pub file_name: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            website_url: DEFAULT_WEBSITE_URL.to_string(),
            max_pages: 500,
            request_delay_ms: 1_000,
            request_timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            priority: "0.8".to_string(),
            file_name: "sitemap.xml".to_string(),
        }
    }
}

impl SitemapConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(WEBSITE_URL_ENV) {
            self.website_url = url;
        }
        if let Some(raw) = lookup(MAX_PAGES_ENV) {
            self.max_pages = raw
                .trim()
                .parse()
                .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: MAX_PAGES_ENV.to_string(),
                    value: raw.clone(),
                    reason: err.to_string(),
                })?;
        }
        Ok(())
    }
}
