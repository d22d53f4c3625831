//! Site adapters. Site registry, the [Website] trait, page handles, and the shared client.

mod client;
mod error;

#[cfg(feature = "browser")]
pub mod chrome;

pub mod allfreenovel;
pub mod gemibook;
pub mod onlinereadfreebooks;
pub mod page;

pub use client::{PoliteClient, PoliteClientBuilder};
pub use error::ScraperError;
pub use page::{HttpPage, PageHandle, StaticPage};

#[cfg(feature = "browser")]
pub use chrome::ChromePage;

use crate::model::Book;
use crate::text::to_latin1_lossy;
use reqwest::Url;
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

/// How long `get_text` waits for a site's text elements to appear.
pub const TEXT_WAIT: Duration = Duration::from_secs(1);

/// Supported book-hosting site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    AllFreeNovel,
    OnlineReadFreeBooks,
    GemiBook,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::AllFreeNovel, Site::OnlineReadFreeBooks, Site::GemiBook];

    /// URL prefix every page URL of this site starts with.
    pub fn base_url(self) -> &'static str {
        match self {
            Site::AllFreeNovel => "https://www.allfreenovel.com/Page/Story/",
            Site::OnlineReadFreeBooks => "https://www.onlinereadfreebooks.com/en/",
            Site::GemiBook => "https://gemibook.com/",
        }
    }

    /// Identifier used on the command line and in config.
    pub fn key(self) -> &'static str {
        match self {
            Site::AllFreeNovel => "allfreenovel",
            Site::OnlineReadFreeBooks => "onlinereadfreebooks",
            Site::GemiBook => "gemibook",
        }
    }

    fn host(self) -> &'static str {
        match self {
            Site::AllFreeNovel => "allfreenovel.com",
            Site::OnlineReadFreeBooks => "onlinereadfreebooks.com",
            Site::GemiBook => "gemibook.com",
        }
    }

    /// CSS query selecting the elements that hold a page's text.
    pub fn text_query(self) -> &'static str {
        website_for(self).text_query()
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Site {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_site(s)
    }
}

/// Resolve a site from its key, a short alias, or a URL on the site's host.
pub fn resolve_site(input: &str) -> Result<Site, ScraperError> {
    let trimmed = input.trim();
    let by_key = match trimmed.to_lowercase().as_str() {
        "allfreenovel" | "all_free_novel" | "afn" => Some(Site::AllFreeNovel),
        "onlinereadfreebooks" | "online_read_free_books" | "orfb" => {
            Some(Site::OnlineReadFreeBooks)
        }
        "gemibook" | "gemi" => Some(Site::GemiBook),
        _ => None,
    };
    if let Some(site) = by_key {
        return Ok(site);
    }
    let host = Url::parse(trimmed)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase));
    if let Some(host) = host {
        let host = host.strip_prefix("www.").unwrap_or(&host);
        if let Some(site) = Site::ALL.into_iter().find(|s| s.host() == host) {
            return Ok(site);
        }
    }
    Err(ScraperError::UnknownSite {
        input: input.to_string(),
    })
}

/// Per-site strategy: build a page URL, then read the page's text once loaded.
pub trait Website {
    fn site(&self) -> Site;

    /// CSS query for the elements holding the page text.
    fn text_query(&self) -> &'static str;

    /// URL of `page_number` for `book`. Pure string building; never checks
    /// `page_number` against `total_pages`.
    fn create_url(
        &self,
        book: &Book,
        page_number: u32,
        total_pages: u32,
    ) -> Result<String, ScraperError>;

    /// Wait up to [TEXT_WAIT] for the text elements on an already loaded page,
    /// join their visible text with newlines, and drop non-Latin-1 characters.
    fn get_text(&self, page: &dyn PageHandle) -> Result<String, ScraperError> {
        let texts = page::wait_for_texts(page, self.text_query(), TEXT_WAIT)?;
        Ok(to_latin1_lossy(&texts.join("\n")))
    }
}

/// Adapter for `site`.
pub fn website_for(site: Site) -> &'static dyn Website {
    match site {
        Site::AllFreeNovel => &allfreenovel::AllFreeNovelWebsite,
        Site::OnlineReadFreeBooks => &onlinereadfreebooks::OnlineReadFreeBooksWebsite,
        Site::GemiBook => &gemibook::GemiBookWebsite,
    }
}
