use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{absolute_url, author_of, timestamp_of};
use crate::document::{selector, NodeQuery};
use crate::error::{Result, ScrapeError};
use crate::models::Author;

static ENTRY: LazyLock<Selector> = LazyLock::new(|| selector(".entry"));
static TITLE_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("p.title a.title"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
static TITLE_LINKS: LazyLock<Selector> = LazyLock::new(|| selector(".title a[href]"));
static COMMENTS: LazyLock<Selector> = LazyLock::new(|| selector(".comments"));

/// One listing entry, before its links are resolved and its replies fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub title: String,
    /// Every href in the title region, in document order.
    pub reference_hrefs: Vec<String>,
    pub author: Author,
    pub submitted_at: String,
    pub reply_thread_url: String,
}

impl PostEntry {
    /// Read a listing entry.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::MissingField`] if the entry has no timestamp or no
    /// comments link.
    pub fn from_element(entry: &ElementRef<'_>, base_url: &str) -> Result<Self> {
        let title = entry
            .find_first(&TITLE_ANCHOR)
            .or_else(|| entry.find_first(&TITLE))
            .map(|title| title.own_text().trim().to_string())
            .unwrap_or_default();

        let reference_hrefs = entry
            .find_all(&TITLE_LINKS)
            .iter()
            .filter_map(|link| link.attribute("href"))
            .map(ToString::to_string)
            .collect();

        let submitted_at = timestamp_of(entry).ok_or(ScrapeError::MissingField {
            field: "submitted_at",
        })?;

        let reply_thread_url = entry
            .find_first(&COMMENTS)
            .and_then(|comments| comments.attribute("href"))
            .map(|href| absolute_url(base_url, href.trim()))
            .ok_or(ScrapeError::MissingField {
                field: "reply_thread_url",
            })?;

        Ok(Self {
            title,
            reference_hrefs,
            author: author_of(entry, base_url),
            submitted_at,
            reply_thread_url,
        })
    }
}

/// Read every `.entry` on a listing page, in document order.
///
/// Entries that fail to parse are returned as errors in place so callers can skip them.
#[must_use]
pub fn parse_listing(html: &str, base_url: &str) -> Vec<Result<PostEntry>> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .find_all(&ENTRY)
        .iter()
        .map(|entry| PostEntry::from_element(entry, base_url))
        .collect()
}
