//! Page handles: the caller-owned "loaded page" that adapters read text from.
//!
//! Adapters only ever call [PageHandle::find_texts]; navigation belongs to the caller.

use crate::scraper::error::ScraperError;
use crate::scraper::PoliteClient;
use crate::text::visible_text;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};

/// Interval between element queries while waiting.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A loaded, navigable page.
pub trait PageHandle {
    /// Load `url`, replacing the current document.
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Visible text of every element matching the CSS `query`, in document order.
    /// No match is `Ok(vec![])`, not an error.
    fn find_texts(&self, query: &str) -> Result<Vec<String>, ScraperError>;

    /// URL of the current document, if known.
    fn current_url(&self) -> Option<&str>;
}

/// Poll `page` for `query` until at least one element matches or `timeout` passes.
///
/// Queries immediately, then every [POLL_INTERVAL]. Errors from the page itself
/// are returned at once; only "nothing matched yet" is retried.
pub fn wait_for_texts(
    page: &dyn PageHandle,
    query: &str,
    timeout: Duration,
) -> Result<Vec<String>, ScraperError> {
    let deadline = Instant::now() + timeout;
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let texts = page.find_texts(query)?;
        tracing::debug!(query, attempt, matched = texts.len(), "element poll");
        if !texts.is_empty() {
            return Ok(texts);
        }
        let now = Instant::now();
        if now >= deadline {
            tracing::warn!(query, ?timeout, url = ?page.current_url(), "element wait timed out");
            return Err(ScraperError::ElementNotFound {
                selector: query.to_string(),
                timeout,
            });
        }
        std::thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

fn parse_selector(sel: &str) -> Result<Selector, ScraperError> {
    Selector::parse(sel).map_err(|e| ScraperError::InvalidSelector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

fn select_texts(doc: &Html, query: &str) -> Result<Vec<String>, ScraperError> {
    let sel = parse_selector(query)?;
    Ok(doc.select(&sel).map(visible_text).collect())
}

/// A page parsed from HTML already in memory (a saved page, a test fixture).
pub struct StaticPage {
    url: Option<String>,
    doc: Html,
}

impl StaticPage {
    pub fn from_html(html: &str) -> Self {
        Self {
            url: None,
            doc: Html::parse_document(html),
        }
    }

    pub fn with_url(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: Some(url.into()),
            doc: Html::parse_document(html),
        }
    }
}

impl PageHandle for StaticPage {
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        Err(ScraperError::NavigationUnsupported {
            url: url.to_string(),
        })
    }

    fn find_texts(&self, query: &str) -> Result<Vec<String>, ScraperError> {
        select_texts(&self.doc, query)
    }

    fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A page driven over HTTP: `navigate` fetches the URL with the polite client
/// and keeps the parsed document for queries.
pub struct HttpPage<'a> {
    client: &'a mut PoliteClient,
    loaded: Option<(String, Html)>,
}

impl<'a> HttpPage<'a> {
    pub fn new(client: &'a mut PoliteClient) -> Self {
        Self {
            client,
            loaded: None,
        }
    }
}

impl PageHandle for HttpPage<'_> {
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        tracing::info!(url, "navigating");
        let response = self.client.get(url).map_err(|e| ScraperError::Network {
            url: url.to_string(),
            source: e,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let final_url = response.url().to_string();
        let body = response.text().map_err(|e| ScraperError::BodyRead {
            url: url.to_string(),
            source: e,
        })?;
        tracing::debug!(url = %final_url, bytes = body.len(), "page loaded");
        self.loaded = Some((final_url, Html::parse_document(&body)));
        Ok(())
    }

    fn find_texts(&self, query: &str) -> Result<Vec<String>, ScraperError> {
        let (_, doc) = self.loaded.as_ref().ok_or(ScraperError::NoPageLoaded)?;
        select_texts(doc, query)
    }

    fn current_url(&self) -> Option<&str> {
        self.loaded.as_ref().map(|(url, _)| url.as_str())
    }
}
