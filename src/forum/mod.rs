//! Mapping forum markup into records.
//!
//! Parsing is synchronous and yields owned entries, so no parsed document is held
//! while pages are being fetched.

mod listing;
mod thread;

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

pub use listing::{parse_listing, PostEntry};
pub use thread::{first_level_replies, parse_thread, parse_upvotes, ReplyEntry};

use crate::document::{selector, NodeQuery};
use crate::models::Author;

static AUTHOR: LazyLock<Selector> = LazyLock::new(|| selector(".author"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));

/// Author named by the first `.author` element under `element`.
fn author_of(element: &ElementRef<'_>, base_url: &str) -> Author {
    let username = element
        .find_first(&AUTHOR)
        .map(|author| author.text_content().trim().to_string())
        .unwrap_or_default();
    Author::new(username, base_url)
}

/// `datetime` attribute of the first `time` element under `element`.
fn timestamp_of(element: &ElementRef<'_>) -> Option<String> {
    element
        .find_first(&TIME)
        .and_then(|time| time.attribute("datetime"))
        .map(|datetime| datetime.trim().to_string())
        .filter(|datetime| !datetime.is_empty())
}

/// Resolve `href` against `base_url`, leaving absolute hrefs untouched.
fn absolute_url(base_url: &str, href: &str) -> String {
    if url::Url::parse(href).is_ok() {
        return href.to_string();
    }
    url::Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map_or_else(|_| href.to_string(), |url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("http://www.reddit.com", "/r/redditgetsdrawn/comments/1/x/"),
            "http://www.reddit.com/r/redditgetsdrawn/comments/1/x/"
        );
        assert_eq!(
            absolute_url("http://www.reddit.com", "https://example.com/a"),
            "https://example.com/a"
        );
    }
}
