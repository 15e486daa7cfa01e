//! Error types for docsplit operations.
//!
//! This module defines the main error type [`DocsplitError`] which represents
//! everything that can go wrong while fetching, extracting, converting and
//! writing documentation. The section splitter itself never fails.
//!
//! # Example
//!
//! ```rust
//! use docsplit_core::{DocsplitError, Result};
//!
//! fn require_content(markdown: &str) -> Result<&str> {
//!     if markdown.trim().is_empty() {
//!         return Err(DocsplitError::NoContent);
//!     }
//!     Ok(markdown)
//! }
//!
//! assert!(require_content("  ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docsplit operations.
#[derive(Error, Debug)]
pub enum DocsplitError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps failures that happen before any attempt is made, such as
    /// building the HTTP client.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout on the final attempt.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or does not use http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Every fetch attempt failed or hit a bot challenge page.
    #[error("Giving up after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No content could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read and write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for DocsplitError.
pub type Result<T> = std::result::Result<T, DocsplitError>;
