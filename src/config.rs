use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_DIRECT_HOST, DEFAULT_IMAGE_HOST, DEFAULT_OUTPUT_PATH,
    DEFAULT_SECTION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Forum
    pub base_url: String,
    pub section: String,
    pub listing_url: String,

    // Image hosting
    pub image_host: String,
    pub image_direct_host: String,
    pub external_link_policy: ExternalLinkPolicy,

    // Fetching
    pub max_concurrency: usize,
    pub request_timeout: Duration,

    // Outputs
    pub html_enabled: bool,
    pub output_path: PathBuf,
    pub report_enabled: bool,
    pub report_path: Option<PathBuf>,
}

/// What to do with links pointing at hosts that are neither the forum nor the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLinkPolicy {
    /// Use the link as the image URL unchanged.
    PassThrough,
    /// Treat the link as carrying no image.
    Reject,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset or empty variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let section = env_or_default("SECTION", DEFAULT_SECTION);
        let listing_url = optional_env("LISTING_URL")
            .unwrap_or_else(|| default_listing_url(&base_url, &section));

        Ok(Self {
            // Forum
            base_url,
            section,
            listing_url,

            // Image hosting
            image_host: env_or_default("IMAGE_HOST", DEFAULT_IMAGE_HOST).to_lowercase(),
            image_direct_host: env_or_default("IMAGE_DIRECT_HOST", DEFAULT_IMAGE_DIRECT_HOST)
                .to_lowercase(),
            external_link_policy: parse_external_link_policy(&env_or_default(
                "EXTERNAL_LINK_POLICY",
                "pass-through",
            ))?,

            // Fetching
            max_concurrency: parse_env_usize("MAX_CONCURRENCY", 4)?,
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),

            // Outputs
            html_enabled: parse_env_bool("HTML_ENABLED", true)?,
            output_path: PathBuf::from(env_or_default("OUTPUT_PATH", DEFAULT_OUTPUT_PATH)),
            report_enabled: parse_env_bool("REPORT_ENABLED", true)?,
            report_path: optional_env("REPORT_PATH").map(PathBuf::from),
        })
    }

    /// Defaults suitable for tests: nothing is read from the environment.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            section: DEFAULT_SECTION.to_string(),
            listing_url: default_listing_url(DEFAULT_BASE_URL, DEFAULT_SECTION),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            image_direct_host: DEFAULT_IMAGE_DIRECT_HOST.to_string(),
            external_link_policy: ExternalLinkPolicy::PassThrough,
            max_concurrency: 4,
            request_timeout: Duration::from_secs(10),
            html_enabled: true,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            report_enabled: true,
            report_path: None,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENCY".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "BASE_URL".to_string(),
                message: format!("'{}' is not an absolute URL", self.base_url),
            });
        }
        if self.listing_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "LISTING_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.section.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SECTION".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.image_host.is_empty() || self.image_direct_host.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "IMAGE_HOST".to_string(),
                message: "image hosts cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_listing_url(base_url: &str, section: &str) -> String {
    format!("{base_url}/r/{section}")
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}

fn parse_external_link_policy(value: &str) -> Result<ExternalLinkPolicy, ConfigError> {
    match value.to_lowercase().as_str() {
        "pass-through" | "passthrough" => Ok(ExternalLinkPolicy::PassThrough),
        "reject" => Ok(ExternalLinkPolicy::Reject),
        _ => Err(ConfigError::InvalidValue {
            name: "EXTERNAL_LINK_POLICY".to_string(),
            message: format!("must be 'pass-through' or 'reject', got '{value}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: &[&str] = &[
        "BASE_URL",
        "SECTION",
        "LISTING_URL",
        "OUTPUT_PATH",
        "MAX_CONCURRENCY",
        "REQUEST_TIMEOUT_SECS",
        "EXTERNAL_LINK_POLICY",
        "HTML_ENABLED",
        "REPORT_PATH",
    ];

    fn clear_vars() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_external_link_policy() {
        assert_eq!(
            parse_external_link_policy("pass-through").unwrap(),
            ExternalLinkPolicy::PassThrough
        );
        assert_eq!(
            parse_external_link_policy("PASSTHROUGH").unwrap(),
            ExternalLinkPolicy::PassThrough
        );
        assert_eq!(
            parse_external_link_policy("Reject").unwrap(),
            ExternalLinkPolicy::Reject
        );
        assert!(parse_external_link_policy("drop").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_env_bool("NONEXISTENT_VAR", true).unwrap());
        assert!(!parse_env_bool("NONEXISTENT_VAR", false).unwrap());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_vars();
        let config = Config::from_env().unwrap();

        assert_eq!(config.base_url, "http://www.reddit.com");
        assert_eq!(config.listing_url, "http://www.reddit.com/r/redditgetsdrawn");
        assert_eq!(
            config.output_path,
            PathBuf::from("./RGD_HTML/RGD_Gallery.html")
        );
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.external_link_policy, ExternalLinkPolicy::PassThrough);
        assert!(config.html_enabled);
        assert!(config.report_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_vars();
        std::env::set_var("BASE_URL", "https://forum.example.com/");
        std::env::set_var("SECTION", "sketches");
        std::env::set_var("MAX_CONCURRENCY", "2");
        std::env::set_var("EXTERNAL_LINK_POLICY", "reject");
        std::env::set_var("HTML_ENABLED", "no");

        let config = Config::from_env().unwrap();
        clear_vars();

        assert_eq!(config.base_url, "https://forum.example.com");
        assert_eq!(config.listing_url, "https://forum.example.com/r/sketches");
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.external_link_policy, ExternalLinkPolicy::Reject);
        assert!(!config.html_enabled);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_integer() {
        clear_vars();
        std::env::set_var("MAX_CONCURRENCY", "many");
        let result = Config::from_env();
        clear_vars();

        assert!(matches!(result, Err(ConfigError::ParseInt { .. })));
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let config = Config {
            max_concurrency: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_relative_base_url() {
        let config = Config {
            base_url: "forum.example.com".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}
