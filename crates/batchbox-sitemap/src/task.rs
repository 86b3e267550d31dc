//! SitemapTask - crawl the configured site and write sitemap.xml into the
//! output directory.

use std::path::PathBuf;

use async_trait::async_trait;
use batchbox_core::domain::ExitStatus;
use batchbox_core::error::TaskError;
use batchbox_core::ports::{Task, TaskContext};
use tracing::info;

use crate::config::SitemapConfig;
use crate::crawler::Crawler;
use crate::error::SitemapError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::url_rules::UrlRules;
use crate::xml::write_sitemap;

pub const TASK_NAME: &str = "sitemap";

pub struct SitemapTask<F = HttpFetcher> {
    config: SitemapConfig,
    fetcher: F,
}

impl SitemapTask<HttpFetcher> {
    pub fn new(config: SitemapConfig) -> Result<Self, SitemapError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetcher> SitemapTask<F> {
    pub fn with_fetcher(config: SitemapConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Crawl and write the sitemap. Returns the path written.
    pub async fn generate(&self, ctx: &TaskContext) -> Result<PathBuf, SitemapError> {
        let config = &self.config;
        info!("Starting sitemap generation for: {}", config.website_url);
        info!("Maximum pages to crawl: {}", config.max_pages);

        let rules = UrlRules::for_site(&config.website_url)?;
        let entries = Crawler::new(&self.fetcher, ctx.clock(), rules)
            .max_pages(config.max_pages)
            .delay(config.request_delay())
            .priority(config.priority.as_str())
            .crawl(&config.website_url)
            .await;

        let path = ctx.output_dir().join(&config.file_name);
        write_sitemap(&path, &entries).await?;
        info!(pages = entries.len(), "Sitemap generated: {}", path.display());
        Ok(path)
    }
}

#[async_trait]
impl<F: Fetcher> Task for SitemapTask<F> {
    fn name(&self) -> &str {
        TASK_NAME
    }

    async fn run(&self, ctx: &TaskContext) -> Result<ExitStatus, TaskError> {
        self.generate(ctx).await.map_err(TaskError::other)?;
        Ok(ExitStatus::SUCCESS)
    }
}
