//! Crawler - depth-first walk of one site.
//!
//! Each page's links are followed in sorted order, depth first, with a pause
//! before every followed link. The walk ends when every reachable page has
//! been visited or `max_pages` entries have been recorded.

use std::collections::{BTreeSet, HashSet, btree_set};
use std::time::Duration;

use batchbox_core::ports::Clock;
use tracing::{debug, info, warn};
use url::Url;

use crate::fetch::Fetcher;
use crate::links::extract_links;
use crate::url_rules::{UrlRules, normalize_url};

const LASTMOD_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub priority: String,
}

pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    clock: &'a dyn Clock,
    rules: UrlRules,
    max_pages: usize,
    delay: Duration,
    priority: String,
}

#[derive(Default)]
struct CrawlState {
    visited: HashSet<String>,
    entries: Vec<SitemapEntry>,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, clock: &'a dyn Clock, rules: UrlRules) -> Self {
        Self {
            fetcher,
            clock,
            rules,
            max_pages: 500,
            delay: Duration::from_secs(1),
            priority: "0.8".to_string(),
        }
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Crawl from `start_url` and return the recorded entries in visit order.
    pub async fn crawl(&self, start_url: &str) -> Vec<SitemapEntry> {
        let mut state = CrawlState::default();
        // One frame per page still being walked: the links not yet followed.
        let mut stack: Vec<btree_set::IntoIter<String>> = Vec::new();

        // Same serialization as discovered links, so the start page is not recorded twice.
        let start_url = match Url::parse(start_url) {
            Ok(parsed) => parsed.to_string(),
            Err(_) => start_url.to_string(),
        };
        if let Some(links) = self.visit(&start_url, &mut state).await {
            stack.push(links.into_iter());
        }

        while let Some(frame) = stack.last_mut() {
            let Some(link) = frame.next() else {
                stack.pop();
                continue;
            };
            if state.visited.contains(&link) {
                continue;
            }
            if self.limit_reached(&state) {
                debug!(max_pages = self.max_pages, "page limit reached");
                break;
            }

            tokio::time::sleep(self.delay).await;
            if let Some(links) = self.visit(&link, &mut state).await {
                stack.push(links.into_iter());
            }
        }

        state.entries
    }

    fn limit_reached(&self, state: &CrawlState) -> bool {
        state.visited.len() >= self.max_pages
    }

    /// Record `url` and return its links, or `None` if it is not visited.
    async fn visit(&self, url: &str, state: &mut CrawlState) -> Option<BTreeSet<String>> {
        if self.limit_reached(state) {
            return None;
        }
        let url = normalize_url(url);
        if state.visited.contains(&url) {
            return None;
        }

        info!("Crawling: {url}");
        state.visited.insert(url.clone());
        state.entries.push(SitemapEntry {
            loc: url.clone(),
            lastmod: self.clock.now().format(LASTMOD_FORMAT).to_string(),
            priority: self.priority.clone(),
        });

        Some(self.links_from_page(&url).await)
    }

    async fn links_from_page(&self, url: &str) -> BTreeSet<String> {
        let page_url = match Url::parse(url) {
            Ok(page_url) => page_url,
            Err(err) => {
                warn!("Error processing {url}: {err}");
                return BTreeSet::new();
            }
        };
        match self.fetcher.fetch(url).await {
            Ok(html) => extract_links(&page_url, &html, &self.rules),
            Err(err) => {
                warn!("Error processing {url}: {err}");
                BTreeSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use batchbox_core::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 17, 23, 59, 0).unwrap())
    }

    fn site() -> StaticFetcher {
        StaticFetcher::new()
            .page(
                "https://example.com",
                r#"<a href="/b">b</a><a href="/a/">a</a><a href="https://other.org/">x</a>"#,
            )
            .page(
                "https://example.com/a",
                r#"<a href="/a/deep">deep</a><a href="/">home</a>"#,
            )
            .page("https://example.com/a/deep", r#"<a href="/b#top">b</a>"#)
            .page("https://example.com/b", "<p>no links</p>")
    }

    async fn crawl(fetcher: &StaticFetcher, max_pages: usize) -> Vec<String> {
        let clock = clock();
        let rules = UrlRules::for_site("https://example.com").unwrap();
        Crawler::new(fetcher, &clock, rules)
            .max_pages(max_pages)
            .delay(Duration::ZERO)
            .crawl("https://example.com/")
            .await
            .into_iter()
            .map(|entry| entry.loc)
            .collect()
    }

    #[tokio::test]
    async fn walks_depth_first_in_sorted_order() {
        let fetcher = site();

        let visited = crawl(&fetcher, 500).await;

        assert_eq!(
            visited,
            vec![
                "https://example.com",
                "https://example.com/a",
                "https://example.com/a/deep",
                "https://example.com/b",
            ]
        );
        assert_eq!(fetcher.requests(), visited);
    }

    #[tokio::test]
    async fn stops_at_max_pages() {
        let fetcher = site();

        let visited = crawl(&fetcher, 2).await;

        assert_eq!(visited, vec!["https://example.com", "https://example.com/a"]);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn zero_max_pages_records_nothing() {
        let fetcher = site();
        assert!(crawl(&fetcher, 0).await.is_empty());
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn unreachable_page_is_recorded_without_links() {
        let fetcher = StaticFetcher::new().page(
            "https://example.com",
            r#"<a href="/missing">gone</a><a href="/ok">ok</a>"#,
        );

        let visited = crawl(&fetcher, 500).await;

        assert_eq!(
            visited,
            vec![
                "https://example.com",
                "https://example.com/missing",
                "https://example.com/ok",
            ]
        );
    }

    #[rstest]
    #[case::uppercase_host("https://Example.com/")]
    #[case::default_port("https://example.com:443/")]
    #[tokio::test]
    async fn start_url_matches_its_discovered_form(#[case] start_url: &str) {
        let fetcher = StaticFetcher::new()
            .page("https://example.com", r#"<a href="/">home</a><a href="/x">x</a>"#)
            .page("https://example.com/x", r#"<a href="/">home</a>"#);
        let clock = clock();
        let rules = UrlRules::for_site(start_url).unwrap();

        let visited: Vec<String> = Crawler::new(&fetcher, &clock, rules)
            .delay(Duration::ZERO)
            .crawl(start_url)
            .await
            .into_iter()
            .map(|entry| entry.loc)
            .collect();

        assert_eq!(visited, vec!["https://example.com", "https://example.com/x"]);
    }

    #[tokio::test]
    async fn entries_carry_lastmod_and_priority() {
        let fetcher = StaticFetcher::new();
        let clock = clock();
        let rules = UrlRules::for_site("https://example.com").unwrap();

        let entries = Crawler::new(&fetcher, &clock, rules)
            .priority("0.5")
            .delay(Duration::ZERO)
            .crawl("https://example.com#intro")
            .await;

        assert_eq!(
            entries,
            vec![SitemapEntry {
                loc: "https://example.com".to_string(),
                lastmod: "2024-05-17".to_string(),
                priority: "0.5".to_string(),
            }]
        );
    }
}
