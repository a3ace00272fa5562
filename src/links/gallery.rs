//! Canonical image extraction from image-host gallery pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::document::selector;

static IMAGE_SRC: LazyLock<Selector> = LazyLock::new(|| selector(r#"link[rel="image_src"]"#));

/// Return the `href` of the first `<link rel="image_src">` on the page.
///
/// Links with an empty `href` are skipped.
#[must_use]
pub fn extract_image_src(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&IMAGE_SRC)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(ToString::to_string)
}
