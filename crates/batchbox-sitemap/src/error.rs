use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("invalid start url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("start url {0} has no host")]
    MissingHost(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to render sitemap: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write sitemap {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
