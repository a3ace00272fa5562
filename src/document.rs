//! Document queries over parsed forum markup.
//!
//! All queries return matches in document order and report a miss as `None` or an
//! empty vec rather than an error.

use scraper::{ElementRef, Selector};

/// Parse a selector known at compile time.
///
/// # Panics
///
/// Panics if `css` is not a valid selector. Only call with literals.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Query helpers for an element and its descendants.
pub trait NodeQuery<'a> {
    /// All descendants matching `selector`, in document order.
    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>>;

    /// The first descendant matching `selector`.
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>>;

    /// Value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// Text of the element's direct text children, excluding text inside child elements.
    fn own_text(&self) -> String;

    /// Concatenated text of the element and all of its descendants.
    fn text_content(&self) -> String;
}

impl<'a> NodeQuery<'a> for ElementRef<'a> {
    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }

    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn own_text(&self) -> String {
        self.children()
            .filter_map(|child| child.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}
