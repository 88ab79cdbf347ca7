//! Error types for the search-cloud pipeline

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, rendering or writing output
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Search endpoint returned status {0}")]
    Status(u16),

    /// Endpoint or constructed search URL is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured CSS selector failed to compile
    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Font file could not be read or parsed
    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    /// Mask image is unusable as a shape
    #[error("Invalid mask image {path}: {reason}")]
    Mask { path: String, reason: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Keyword must not be empty")]
    EmptyKeyword,
}
