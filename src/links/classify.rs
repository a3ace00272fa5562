use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::constants::{ASSUMED_IMAGE_EXTENSION, DOMAIN_INDEX_MARKER};

static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(png|jpe?g|gif)$").unwrap());

/// What a raw href points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Empty, fragment-only, or a non-HTTP scheme.
    Unusable,
    /// A link back into the forum: its own navigation, user pages or other threads.
    Navigational,
    /// A raw image file on the direct host. Carries the href unchanged.
    DirectImage(String),
    /// A file on the direct host with no image extension. Carries the rewritten URL.
    DirectWithoutExtension(String),
    /// An album or single-image page on the image host that has to be fetched.
    GalleryPage(String),
    /// Anything else. Carries the absolute URL.
    External(String),
}

/// Classifies hrefs found in forum markup.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    base_url: Url,
    section_marker: String,
    image_host: String,
    image_direct_host: String,
}

impl LinkClassifier {
    /// Create a classifier for the forum at `base_url` listing `section`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        section: &str,
        image_host: &str,
        image_direct_host: &str,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            section_marker: format!("/r/{section}/"),
            image_host: image_host.to_lowercase(),
            image_direct_host: image_direct_host.to_lowercase(),
        })
    }

    #[must_use]
    pub fn classify(&self, raw_href: &str) -> LinkKind {
        let href = raw_href.trim();
        if href.is_empty() || href.starts_with('#') {
            return LinkKind::Unusable;
        }

        if href.contains(DOMAIN_INDEX_MARKER) || href.contains(&self.section_marker) {
            return LinkKind::Navigational;
        }

        let (url, absolute) = match Url::parse(href) {
            Ok(url) => (url, href.to_string()),
            Err(_) => match self.base_url.join(href) {
                Ok(url) => {
                    let absolute = url.to_string();
                    (url, absolute)
                }
                Err(_) => return LinkKind::Unusable,
            },
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return LinkKind::Unusable;
        }

        let host = url.host_str().unwrap_or_default().to_lowercase();
        let kind = if host == self.image_direct_host {
            if IMAGE_EXTENSION.is_match(url.path()) {
                LinkKind::DirectImage(absolute)
            } else {
                LinkKind::DirectWithoutExtension(append_extension(url, &absolute))
            }
        } else if self.is_image_host(&host) {
            LinkKind::GalleryPage(absolute)
        } else if self.is_forum_host(&url) {
            LinkKind::Navigational
        } else {
            LinkKind::External(absolute)
        };

        debug!(href = %href, kind = ?kind, "Classified link");
        kind
    }

    fn is_forum_host(&self, url: &Url) -> bool {
        url.host_str() == self.base_url.host_str()
    }

    fn is_image_host(&self, host: &str) -> bool {
        host == self.image_host
            || host
                .strip_suffix(self.image_host.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Append [`ASSUMED_IMAGE_EXTENSION`] to the URL's path.
///
/// A plain `scheme://host/path` href is extended textually so the result is exactly
/// `href + ".jpg"`. A bare host is never extended textually.
fn append_extension(mut url: Url, absolute: &str) -> String {
    if url.path() != "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && !absolute.ends_with('/')
    {
        return format!("{absolute}{ASSUMED_IMAGE_EXTENSION}");
    }
    let path = format!(
        "{}{ASSUMED_IMAGE_EXTENSION}",
        url.path().trim_end_matches('/')
    );
    url.set_path(&path);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LinkClassifier {
        LinkClassifier::new(
            "http://www.reddit.com",
            "redditgetsdrawn",
            "imgur.com",
            "i.imgur.com",
        )
        .unwrap()
    }

    #[test]
    fn test_direct_image_with_extension_is_unchanged() {
        let c = classifier();
        for href in [
            "http://i.imgur.com/LVJy5YG.jpg",
            "http://i.imgur.com/LVJy5YG.png",
            "https://i.imgur.com/LVJy5YG.gif",
            "http://i.imgur.com/LVJy5YG.JPG",
        ] {
            assert_eq!(c.classify(href), LinkKind::DirectImage(href.to_string()));
        }
    }

    #[test]
    fn test_direct_image_without_extension_gets_jpg() {
        let c = classifier();
        for href in ["http://i.imgur.com/LVJy5YG", "https://i.imgur.com/abc123"] {
            assert_eq!(
                c.classify(href),
                LinkKind::DirectWithoutExtension(format!("{href}.jpg"))
            );
        }
    }

    #[test]
    fn test_direct_image_with_query_extends_path() {
        assert_eq!(
            classifier().classify("http://i.imgur.com/abc?x=1"),
            LinkKind::DirectWithoutExtension("http://i.imgur.com/abc.jpg?x=1".to_string())
        );
    }

    #[test]
    fn test_navigational_links() {
        let c = classifier();
        assert_eq!(c.classify("/domain/imgur.com/"), LinkKind::Navigational);
        assert_eq!(
            c.classify("http://www.reddit.com/r/redditgetsdrawn/comments/1zysx2/please_draw/"),
            LinkKind::Navigational
        );
        assert_eq!(
            c.classify("/r/redditgetsdrawn/comments/1zysx2/"),
            LinkKind::Navigational
        );
    }

    #[test]
    fn test_gallery_pages() {
        let c = classifier();
        assert_eq!(
            c.classify("http://imgur.com/LVJy5YG"),
            LinkKind::GalleryPage("http://imgur.com/LVJy5YG".to_string())
        );
        assert_eq!(
            c.classify("https://www.imgur.com/a/abc"),
            LinkKind::GalleryPage("https://www.imgur.com/a/abc".to_string())
        );
    }

    #[test]
    fn test_lookalike_host_is_external() {
        assert_eq!(
            classifier().classify("http://notimgur.com/abc"),
            LinkKind::External("http://notimgur.com/abc".to_string())
        );
    }

    #[test]
    fn test_external_links() {
        assert_eq!(
            classifier().classify("https://example.com/drawing.png"),
            LinkKind::External("https://example.com/drawing.png".to_string())
        );
    }

    #[test]
    fn test_direct_host_without_path_extends_path() {
        let c = classifier();
        assert_eq!(
            c.classify("http://i.imgur.com"),
            LinkKind::DirectWithoutExtension("http://i.imgur.com/.jpg".to_string())
        );
        assert_eq!(
            c.classify("http://i.imgur.com/"),
            LinkKind::DirectWithoutExtension("http://i.imgur.com/.jpg".to_string())
        );
    }

    #[test]
    fn test_forum_links_are_navigational() {
        let c = classifier();
        for href in [
            "/u/op",
            "/user/someone",
            "http://www.reddit.com/user/someone",
            "https://www.reddit.com/r/otherSub/comments/1/x/",
            "/r/otherSub/comments/1/x/",
        ] {
            assert_eq!(c.classify(href), LinkKind::Navigational, "{href}");
        }
    }

    #[test]
    fn test_other_forum_subdomain_is_external() {
        assert_eq!(
            classifier().classify("http://old.reddit.com/user/someone"),
            LinkKind::External("http://old.reddit.com/user/someone".to_string())
        );
    }

    #[test]
    fn test_unusable_links() {
        let c = classifier();
        assert_eq!(c.classify(""), LinkKind::Unusable);
        assert_eq!(c.classify("#"), LinkKind::Unusable);
        assert_eq!(c.classify("javascript:void(0)"), LinkKind::Unusable);
        assert_eq!(c.classify("mailto:someone@example.com"), LinkKind::Unusable);
    }
}
