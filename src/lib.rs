//! Reference-photo gallery builder.
//!
//! Scrapes one listing page of an art-request forum, follows each post's reference
//! image link (resolving image-host gallery pages to their canonical image), collects
//! the artworks posted as first-level replies, and renders everything as a static
//! HTML gallery.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod fetch;
pub mod forum;
pub mod fs_utils;
pub mod links;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod report;

pub use error::ScrapeError;
pub use models::{Artwork, Author, Post};
pub use pipeline::{run, RunSummary, Scraper};
