//! Shared error type for site adapters and page backends.

use std::time::Duration;
use thiserror::Error;

/// Shared scraper error for site lookup, URL building, page loading, and text extraction.
#[derive(Debug, Error)]
pub enum ScraperError {
    // Site lookup
    #[error("Unknown site '{input}'. Use one of: allfreenovel, onlinereadfreebooks, gemibook.")]
    UnknownSite { input: String },

    // URL construction
    #[error("Malformed book identifier '{number}': {reason}")]
    MalformedBook { number: String, reason: String },

    // Page loading
    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Browser error while {action}: {reason}")]
    Browser { action: String, reason: String },

    #[error("No page loaded; navigate before querying elements.")]
    NoPageLoaded,

    #[error("This page was loaded from memory and cannot navigate to {url}.")]
    NavigationUnsupported { url: String },

    // Extraction
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No element matching {selector:?} appeared within {timeout:?}.")]
    ElementNotFound { selector: String, timeout: Duration },
}
