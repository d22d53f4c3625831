//! novelpages: per-page URL building and text extraction for AllFreeNovel, OnlineReadFreeBooks and GemiBook.

pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod scraper;
pub mod text;

// Re-exports for CLI and consumers.
pub use model::{Book, PageText};
pub use scraper::{
    resolve_site, website_for, HttpPage, PageHandle, PoliteClient, PoliteClientBuilder,
    ScraperError, Site, StaticPage, Website, TEXT_WAIT,
};
