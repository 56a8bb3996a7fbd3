//! acm-crawler: lazy co-authorship graph discovery
//!
//! This crate walks an author-profile web source one author at a time. For each
//! author it follows a fixed page sequence (profile, colleagues, paper listing,
//! BibTeX), extracts collaborators and papers from hyperlink markup, persists
//! them through a [`storage::GraphStore`], and hands the discovered
//! collaborators back as a pull-based [`model::Neighbors`] sequence.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod render;
pub mod storage;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Element {locator} not found on {url}")]
    ElementNotFound { locator: String, url: String },

    #[error("Timed out after {timeout:?} waiting for {locator} on {url}")]
    Timeout {
        locator: String,
        url: String,
        timeout: std::time::Duration,
    },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page unavailable: {url} (status {status})")]
    PageUnavailable { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid stage transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crawler::TraversalStage,
        to: crawler::TraversalStage,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Explorer, TraversalSettings};
pub use model::{Author, Neighbors};
pub use storage::{GraphStore, SqliteGraphStore};
