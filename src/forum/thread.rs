use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{author_of, timestamp_of};
use crate::document::{selector, NodeQuery};
use crate::models::Author;

static ENTRY: LazyLock<Selector> = LazyLock::new(|| selector(".entry"));
static NESTED_ENTRY: LazyLock<Selector> = LazyLock::new(|| selector(".child .entry"));
static BODY_LINK: LazyLock<Selector> = LazyLock::new(|| selector(".md a[href]"));
static LIKED_SCORE: LazyLock<Selector> = LazyLock::new(|| selector(".score.likes"));

/// Top-level replies on a thread page, in document order.
///
/// Entries nested under a `.child` container are replies to replies and are dropped.
/// The first remaining entry is the original post rendered above its replies and is
/// dropped too.
#[must_use]
pub fn first_level_replies(document: &Html) -> Vec<ElementRef<'_>> {
    let root = document.root_element();
    let nested: HashSet<_> = root
        .find_all(&NESTED_ENTRY)
        .iter()
        .map(|entry| entry.id())
        .collect();

    root.find_all(&ENTRY)
        .into_iter()
        .filter(|entry| !nested.contains(&entry.id()))
        .skip(1)
        .collect()
}

/// One first-level reply, before its art link is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyEntry {
    /// First link in the reply body, if any.
    pub art_href: Option<String>,
    pub author: Author,
    pub submitted_at: Option<String>,
    pub upvotes: Option<i64>,
}

impl ReplyEntry {
    #[must_use]
    pub fn from_element(reply: &ElementRef<'_>, base_url: &str) -> Self {
        let art_href = reply
            .find_first(&BODY_LINK)
            .and_then(|link| link.attribute("href"))
            .map(|href| href.trim().to_string());

        let upvotes = reply
            .find_first(&LIKED_SCORE)
            .and_then(|score| parse_upvotes(&score.text_content()));

        Self {
            art_href,
            author: author_of(reply, base_url),
            submitted_at: timestamp_of(reply),
            upvotes,
        }
    }
}

/// Read every first-level reply on a thread page.
#[must_use]
pub fn parse_thread(html: &str, base_url: &str) -> Vec<ReplyEntry> {
    let document = Html::parse_document(html);
    first_level_replies(&document)
        .iter()
        .map(|reply| ReplyEntry::from_element(reply, base_url))
        .collect()
}

/// Leading integer of a score text such as `"30 points"`.
#[must_use]
pub fn parse_upvotes(text: &str) -> Option<i64> {
    text.split_whitespace().next()?.parse().ok()
}
