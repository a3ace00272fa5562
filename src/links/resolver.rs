use std::sync::Arc;

use tracing::{debug, warn};

use super::classify::{LinkClassifier, LinkKind};
use super::gallery::extract_image_src;
use crate::config::ExternalLinkPolicy;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;

/// Turns raw hrefs into directly loadable image URLs.
///
/// Gallery pages cost one fetch each. Nothing is cached, so a gallery linked twice is
/// fetched twice.
#[derive(Clone)]
pub struct LinkResolver {
    classifier: LinkClassifier,
    policy: ExternalLinkPolicy,
    fetcher: Arc<dyn PageFetcher>,
}

impl LinkResolver {
    #[must_use]
    pub fn new(
        classifier: LinkClassifier,
        policy: ExternalLinkPolicy,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            classifier,
            policy,
            fetcher,
        }
    }

    /// Resolve one href.
    ///
    /// Returns `Ok(None)` for links that carry no image.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if a gallery page cannot be fetched and
    /// [`ScrapeError::LinkResolution`] if it has no `image_src` link.
    pub async fn resolve(&self, raw_href: &str) -> Result<Option<String>> {
        match self.classifier.classify(raw_href) {
            LinkKind::Unusable | LinkKind::Navigational => Ok(None),
            LinkKind::DirectImage(url) | LinkKind::DirectWithoutExtension(url) => Ok(Some(url)),
            LinkKind::GalleryPage(url) => {
                let body = self.fetcher.fetch(&url).await?;
                match extract_image_src(&body) {
                    Some(image) => {
                        debug!(gallery = %url, image = %image, "Resolved gallery page");
                        Ok(Some(image))
                    }
                    None => Err(ScrapeError::LinkResolution { url }),
                }
            }
            LinkKind::External(url) => match self.policy {
                ExternalLinkPolicy::PassThrough => Ok(Some(url)),
                ExternalLinkPolicy::Reject => Ok(None),
            },
        }
    }

    /// Resolve one href, logging failures and reporting them as no image.
    pub async fn resolve_or_none(&self, raw_href: &str) -> Option<String> {
        match self.resolve(raw_href).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(href = %raw_href, error = %e, "Could not resolve image link");
                None
            }
        }
    }

    /// Resolve hrefs in order and return the first image found.
    pub async fn resolve_first<I, S>(&self, hrefs: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for href in hrefs {
            if let Some(url) = self.resolve_or_none(href.as_ref()).await {
                return Some(url);
            }
        }
        None
    }
}

impl std::fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkResolver")
            .field("classifier", &self.classifier)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
