//! batchbox-sitemap
//!
//! The bundled batchbox task: crawl one website depth-first and write a
//! `sitemap.xml` into the output directory prepared by the harness.
//!
//! - **config**: `SitemapConfig` (`WEBSITE_URL`, `MAX_PAGES`, politeness settings)
//! - **url_rules**: normalization and same-site filtering
//! - **links**: anchor extraction
//! - **fetch**: `Fetcher` port and the reqwest implementation
//! - **crawler**: the crawl itself
//! - **xml**: sitemap rendering
//! - **task**: `SitemapTask`, the `Task` implementation

pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod links;
pub mod task;
pub mod url_rules;
pub mod xml;

pub use config::SitemapConfig;
pub use crawler::{Crawler, SitemapEntry};
pub use error::SitemapError;
pub use fetch::{Fetcher, HttpFetcher};
pub use task::SitemapTask;
