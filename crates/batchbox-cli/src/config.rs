//! Application configuration: `[harness]` and `[sitemap]` tables of one TOML file.
//!
//! ```toml
//! [harness]
//! output_dir = "/app/output"
//!
//! [harness.environment]
//! unbuffered_output = true
//! no_bytecode_cache = true
//!
//! [harness.environment.vars]
//! APP_ENV = "production"
//!
//! [sitemap]
//! website_url = "https://example.com"
//! max_pages = 500
//! ```

use std::path::Path;

use batchbox_core::HarnessConfig;
use batchbox_core::config;
use batchbox_core::error::ConfigError;
use batchbox_sitemap::SitemapConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub harness: HarnessConfig,
    pub sitemap: SitemapConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        config::load_toml(path)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.harness.apply_env(&lookup)?;
        self.sitemap.apply_env(&lookup)
    }
}
