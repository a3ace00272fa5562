//! Static HTML gallery rendering.

use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::models::Post;

/// Minimal styling inlined in the page head.
const GALLERY_STYLE: &str = r"
body { font-family: sans-serif; margin: 2rem; }
.post { margin-bottom: 3rem; }
.post > img { max-width: 480px; }
.artworks { display: flex; flex-wrap: wrap; gap: 1rem; }
.art img { max-width: 320px; }
";

/// One gallery row: the reference photo followed by the artworks drawn from it.
#[derive(Debug, Clone, Copy)]
pub struct PostCard<'a> {
    reference: &'a str,
    post: &'a Post,
}

impl<'a> PostCard<'a> {
    /// Card for `post`, or `None` when the post has nothing to show.
    #[must_use]
    pub fn new(post: &'a Post) -> Option<Self> {
        if !post.is_displayable() {
            return None;
        }
        let reference = post.reference_image_url.as_deref()?;
        Some(Self { reference, post })
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post" {
                p { (self.post.title) }
                img src=(self.reference);
                div class="artworks" {
                    @for (_, url) in self.post.artworks_with_images() {
                        div class="art" {
                            img src=(url);
                        }
                    }
                }
            }
        }
    }
}

/// Render the gallery page.
///
/// Posts without a reference image, or without any artwork image, are left out.
/// Text and attribute values are HTML-escaped.
#[must_use]
pub fn render_gallery(posts: &[Post], page_title: &str) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (page_title) }
                style { (PreEscaped(GALLERY_STYLE)) }
            }
            body {
                @for card in posts.iter().filter_map(PostCard::new) {
                    (card)
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artwork, Author};

    const BASE: &str = "http://www.reddit.com";

    fn artwork(url: Option<&str>) -> Artwork {
        Artwork {
            art_image_url: url.map(ToString::to_string),
            author: Author::new("artist", BASE),
            submitted_at: Some("2014-03-11T16:55:29+00:00".to_string()),
            upvotes: Some(30),
        }
    }

    fn post(title: &str, reference: Option<&str>, artworks: Vec<Artwork>) -> Post {
        Post {
            title: title.to_string(),
            reference_image_url: reference.map(ToString::to_string),
            author: Author::new("poster", BASE),
            submitted_at: "2014-03-09T14:18:03+00:00".to_string(),
            reply_thread_url: format!("{BASE}/r/redditgetsdrawn/comments/1/"),
            artworks,
        }
    }

    #[test]
    fn test_empty_gallery_is_shell_only() {
        let html = render_gallery(&[], "/r/redditgetsdrawn Gallery");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>/r/redditgetsdrawn Gallery</title>"));
        assert!(html.contains("<body></body>"));
        assert!(!html.contains("class=\"post\""));
    }

    #[test]
    fn test_renders_reference_and_artworks() {
        let posts = vec![post(
            "Draw my grandparents",
            Some("http://i.imgur.com/LVJy5YG.jpg"),
            vec![
                artwork(Some("http://i.imgur.com/art1.jpg")),
                artwork(Some("http://i.imgur.com/art2.png")),
            ],
        )];
        let html = render_gallery(&posts, "Gallery");

        assert_eq!(html.matches("class=\"post\"").count(), 1);
        assert!(html.contains("<p>Draw my grandparents</p>"));
        assert!(html.contains("<img src=\"http://i.imgur.com/LVJy5YG.jpg\">"));
        assert!(html.contains("<div class=\"art\"><img src=\"http://i.imgur.com/art1.jpg\"></div>"));
        assert!(html.contains("<div class=\"art\"><img src=\"http://i.imgur.com/art2.png\"></div>"));
    }

    #[test]
    fn test_artworks_without_image_are_skipped() {
        let posts = vec![post(
            "Draw me",
            Some("http://i.imgur.com/ref.jpg"),
            vec![artwork(None), artwork(Some("http://i.imgur.com/art.jpg"))],
        )];
        let html = render_gallery(&posts, "Gallery");

        assert_eq!(html.matches("<img").count(), 2);
        assert_eq!(html.matches("class=\"art\"").count(), 1);
    }

    #[test]
    fn test_posts_without_displayable_artworks_are_omitted() {
        let posts = vec![
            post("No artworks", Some("http://i.imgur.com/a.jpg"), vec![]),
            post(
                "Only empty artworks",
                Some("http://i.imgur.com/b.jpg"),
                vec![artwork(None), artwork(None)],
            ),
            post(
                "No reference",
                None,
                vec![artwork(Some("http://i.imgur.com/c.jpg"))],
            ),
            post(
                "Kept",
                Some("http://i.imgur.com/d.jpg"),
                vec![artwork(Some("http://i.imgur.com/e.jpg"))],
            ),
        ];
        let html = render_gallery(&posts, "Gallery");

        assert_eq!(html.matches("class=\"post\"").count(), 1);
        assert!(html.contains("<p>Kept</p>"));
        assert!(!html.contains("No artworks"));
        assert!(!html.contains("Only empty artworks"));
        assert!(!html.contains("No reference"));
    }

    #[test]
    fn test_title_is_escaped() {
        let posts = vec![post(
            "<script>alert(1)</script> & friends",
            Some("http://i.imgur.com/a.jpg"),
            vec![artwork(Some("http://i.imgur.com/b.jpg"))],
        )];
        let html = render_gallery(&posts, "Gallery");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; friends"));
    }

    #[test]
    fn test_posts_keep_input_order() {
        let posts = vec![
            post("First", Some("http://i.imgur.com/1.jpg"), vec![artwork(Some("http://i.imgur.com/a.jpg"))]),
            post("Second", Some("http://i.imgur.com/2.jpg"), vec![artwork(Some("http://i.imgur.com/b.jpg"))]),
        ];
        let html = render_gallery(&posts, "Gallery");

        let first = html.find("<p>First</p>").unwrap();
        let second = html.find("<p>Second</p>").unwrap();
        assert!(first < second);
    }
}
