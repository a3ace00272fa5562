//! Errors raised while scraping the forum and resolving image links.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure or non-success status for any page fetch.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A structurally required field is absent from the markup.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// A gallery page carried no `image_src` link.
    #[error("no image_src link found on gallery page {url}")]
    LinkResolution { url: String },
}

impl ScrapeError {
    pub(crate) fn fetch(url: &str, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
