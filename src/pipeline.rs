//! Run orchestration: listing → posts → threads → report and gallery.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::forum::{parse_listing, parse_thread, PostEntry, ReplyEntry};
use crate::fs_utils::write_creating_dirs;
use crate::links::{LinkClassifier, LinkResolver};
use crate::models::{Artwork, Post};
use crate::render::render_gallery;
use crate::report::RunReport;

/// Posts extracted from one listing page.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    /// Built posts, in listing order.
    pub posts: Vec<Post>,
    /// Number of `.entry` elements on the listing.
    pub entries_found: usize,
    /// Entries dropped for missing fields or an unreachable thread.
    pub entries_skipped: usize,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub entries_found: usize,
    pub entries_skipped: usize,
    pub posts_built: usize,
    pub posts_displayed: usize,
}

/// Builds [`Post`] records from a listing page.
#[derive(Clone)]
pub struct Scraper {
    base_url: String,
    resolver: LinkResolver,
    fetcher: Arc<dyn PageFetcher>,
    max_concurrency: usize,
}

impl Scraper {
    /// Create a scraper for the forum described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not an absolute URL.
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let classifier = LinkClassifier::new(
            &config.base_url,
            &config.section,
            &config.image_host,
            &config.image_direct_host,
        )
        .with_context(|| format!("Invalid base URL: {}", config.base_url))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            resolver: LinkResolver::new(
                classifier,
                config.external_link_policy,
                Arc::clone(&fetcher),
            ),
            fetcher,
            max_concurrency: config.max_concurrency.max(1),
        })
    }

    /// Fetch the listing and build a post for every usable entry.
    ///
    /// Posts are extracted up to `max_concurrency` at a time and returned in listing
    /// order. A bad entry only skips that entry.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if the listing page itself cannot be fetched.
    pub async fn scrape(&self, listing_url: &str) -> Result<ScrapeOutcome, ScrapeError> {
        let body = self.fetcher.fetch(listing_url).await?;
        let parsed = parse_listing(&body, &self.base_url);

        let mut outcome = ScrapeOutcome {
            entries_found: parsed.len(),
            ..ScrapeOutcome::default()
        };
        info!(entries = outcome.entries_found, "Parsed listing");

        let mut entries = Vec::with_capacity(parsed.len());
        for (index, entry) in parsed.into_iter().enumerate() {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(index, error = %e, "Skipping listing entry");
                    outcome.entries_skipped += 1;
                }
            }
        }

        let results: Vec<_> = stream::iter(entries)
            .map(|entry| self.build_post(entry))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        for result in results {
            match result {
                Ok(post) => outcome.posts.push(post),
                Err(e) => {
                    warn!(error = %e, "Skipping post");
                    outcome.entries_skipped += 1;
                }
            }
        }

        Ok(outcome)
    }

    /// Resolve a listing entry's reference image and collect its first-level replies.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if the reply thread cannot be fetched.
    pub async fn build_post(&self, entry: PostEntry) -> Result<Post, ScrapeError> {
        let reference_image_url = self.resolver.resolve_first(&entry.reference_hrefs).await;

        let thread = self.fetcher.fetch(&entry.reply_thread_url).await?;
        let replies = parse_thread(&thread, &self.base_url);
        debug!(
            thread = %entry.reply_thread_url,
            replies = replies.len(),
            "Parsed reply thread"
        );

        let mut artworks = Vec::with_capacity(replies.len());
        for reply in replies {
            artworks.push(self.build_artwork(reply).await);
        }

        Ok(Post {
            title: entry.title,
            reference_image_url,
            author: entry.author,
            submitted_at: entry.submitted_at,
            reply_thread_url: entry.reply_thread_url,
            artworks,
        })
    }

    /// Resolve a reply's art link. A reply without a usable link still yields an artwork.
    pub async fn build_artwork(&self, reply: ReplyEntry) -> Artwork {
        let art_image_url = match reply.art_href.as_deref() {
            Some(href) => self.resolver.resolve_or_none(href).await,
            None => None,
        };

        Artwork {
            art_image_url,
            author: reply.author,
            submitted_at: reply.submitted_at,
            upvotes: reply.upvotes,
        }
    }
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper")
            .field("base_url", &self.base_url)
            .field("resolver", &self.resolver)
            .field("max_concurrency", &self.max_concurrency)
            .finish_non_exhaustive()
    }
}

/// Scrape the configured listing, then emit the report and the gallery page.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched or an output cannot be written.
pub async fn run(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<RunSummary> {
    let scraper = Scraper::new(config, fetcher)?;

    info!(listing_url = %config.listing_url, "Scraping listing");
    let outcome = scraper
        .scrape(&config.listing_url)
        .await
        .context("Failed to scrape listing")?;

    let summary = RunSummary {
        entries_found: outcome.entries_found,
        entries_skipped: outcome.entries_skipped,
        posts_built: outcome.posts.len(),
        posts_displayed: outcome.posts.iter().filter(|p| p.is_displayable()).count(),
    };

    if config.report_enabled {
        let report = RunReport::new(
            &config.listing_url,
            outcome.entries_found,
            outcome.entries_skipped,
            &outcome.posts,
        );
        report.log();
        if let Some(path) = &config.report_path {
            report.write_json(path).await?;
            info!(path = %path.display(), "Report written");
        }
    }

    if config.html_enabled {
        let page_title = format!("/r/{} Gallery", config.section);
        let html = render_gallery(&outcome.posts, &page_title);
        write_creating_dirs(&config.output_path, html.as_bytes(), "gallery").await?;
        info!(
            path = %config.output_path.display(),
            posts = summary.posts_displayed,
            "Gallery written"
        );
    }

    Ok(summary)
}
