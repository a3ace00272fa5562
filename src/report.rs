//! Run report: the extracted records, independent of the rendered gallery.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::fs_utils::write_creating_dirs;
use crate::models::Post;

/// Everything a run extracted, as written to the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub listing_url: &'a str,
    pub entries_found: usize,
    pub entries_skipped: usize,
    pub posts: &'a [Post],
}

impl<'a> RunReport<'a> {
    #[must_use]
    pub fn new(
        listing_url: &'a str,
        entries_found: usize,
        entries_skipped: usize,
        posts: &'a [Post],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            listing_url,
            entries_found,
            entries_skipped,
            posts,
        }
    }

    /// Emit one log event per post and per artwork that resolved to an image.
    pub fn log(&self) {
        for (index, post) in self.posts.iter().enumerate() {
            info!(
                index,
                title = %post.title,
                reference_image_url = post.reference_image_url.as_deref().unwrap_or("-"),
                author = %post.author.username,
                author_url = %post.author.profile_url,
                submitted_at = %post.submitted_at,
                reply_thread_url = %post.reply_thread_url,
                artworks = post.artworks.len(),
                displayable = post.is_displayable(),
                "Post"
            );

            for (art_index, (artwork, url)) in post.artworks_with_images().enumerate() {
                info!(
                    post = index,
                    index = art_index,
                    art_image_url = %url,
                    author = %artwork.author.username,
                    author_url = %artwork.author.profile_url,
                    submitted_at = artwork.submitted_at.as_deref().unwrap_or("-"),
                    upvotes = ?artwork.upvotes,
                    "Artwork"
                );
            }
        }

        info!(
            entries_found = self.entries_found,
            entries_skipped = self.entries_skipped,
            posts = self.posts.len(),
            "Report complete"
        );
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self).context("Failed to serialize run report")?;
        write_creating_dirs(path, &json, "report").await
    }
}
