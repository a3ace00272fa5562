//! Shared constants used across the application.

/// User agent string sent with every page fetch.
pub const SCRAPER_USER_AGENT: &str = "rgd-gallery/0.1 (+static gallery builder)";

/// Forum origin used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://www.reddit.com";

/// Listing section used when `SECTION` is not set.
pub const DEFAULT_SECTION: &str = "redditgetsdrawn";

/// Destination of the rendered gallery when `OUTPUT_PATH` is not set.
pub const DEFAULT_OUTPUT_PATH: &str = "./RGD_HTML/RGD_Gallery.html";

/// Host serving album and single-image pages.
pub const DEFAULT_IMAGE_HOST: &str = "imgur.com";

/// Host serving raw image files.
pub const DEFAULT_IMAGE_DIRECT_HOST: &str = "i.imgur.com";

/// Path segment of the forum's per-domain index pages.
pub const DOMAIN_INDEX_MARKER: &str = "/domain/";

/// Extension appended to direct-host links that carry none.
pub const ASSUMED_IMAGE_EXTENSION: &str = ".jpg";
