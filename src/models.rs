//! Records extracted from the forum.

use serde::Serialize;

/// A forum user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub username: String,
    pub profile_url: String,
}

impl Author {
    /// Build an author whose profile lives at `{base_url}/user/{username}`.
    #[must_use]
    pub fn new(username: impl Into<String>, base_url: &str) -> Self {
        let username = username.into();
        let profile_url = format!("{}/user/{username}", base_url.trim_end_matches('/'));
        Self {
            username,
            profile_url,
        }
    }
}

/// A reference photo submitted to the listing, with the artworks drawn from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    pub reference_image_url: Option<String>,
    pub author: Author,
    /// ISO-8601, verbatim from the markup.
    pub submitted_at: String,
    pub reply_thread_url: String,
    /// First-level replies only.
    pub artworks: Vec<Artwork>,
}

impl Post {
    /// Artworks that resolved to an image.
    pub fn artworks_with_images(&self) -> impl Iterator<Item = (&Artwork, &str)> {
        self.artworks
            .iter()
            .filter_map(|art| art.art_image_url.as_deref().map(|url| (art, url)))
    }

    /// Whether the post belongs in the gallery: it has a reference image and at least
    /// one artwork with an image.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        self.reference_image_url.is_some() && self.artworks_with_images().next().is_some()
    }
}

/// A first-level reply to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artwork {
    pub art_image_url: Option<String>,
    pub author: Author,
    pub submitted_at: Option<String>,
    /// `None` when the score is hidden, never zero by default.
    pub upvotes: Option<i64>,
}
