//! Live-DOM page backend: drives a local Chrome/Chromium over CDP with chromiumoxide.
//!
//! Each `find_texts` call queries the current DOM, so [wait_for_texts](crate::scraper::page::wait_for_texts)
//! sees elements that scripts add after the initial load.

use crate::scraper::error::ScraperError;
use crate::scraper::page::PageHandle;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

fn browser_error(action: &str, e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Browser {
        action: action.to_string(),
        reason: e.to_string(),
    }
}

/// A browser tab. Owns the browser process; closing happens on drop.
pub struct ChromePage {
    runtime: Runtime,
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    url: Option<String>,
}

impl ChromePage {
    /// Launch Chrome (headless unless `headed`) and open a blank tab.
    pub fn launch(headed: bool) -> Result<Self, ScraperError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| browser_error("starting runtime", e))?;

        let mut builder = BrowserConfig::builder();
        if headed {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| browser_error("building browser config", e))?;

        let (browser, mut handler) = runtime
            .block_on(Browser::launch(config))
            .map_err(|e| browser_error("launching browser", e))?;
        let handler = runtime.spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!(error = %err, "browser handler event error");
                }
            }
        });

        let page = match runtime.block_on(browser.new_page("about:blank")) {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(browser_error("opening tab", e));
            }
        };
        tracing::info!(headed, "browser launched");
        Ok(Self {
            runtime,
            browser,
            handler,
            page,
            url: None,
        })
    }
}

impl PageHandle for ChromePage {
    fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        tracing::info!(url, "navigating browser");
        let page = &self.page;
        let current = self.runtime.block_on(async {
            page.goto(url)
                .await
                .map_err(|e| browser_error("navigating", e))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| browser_error("waiting for navigation", e))?;
            page.url().await.map_err(|e| browser_error("reading URL", e))
        })?;
        self.url = Some(current.unwrap_or_else(|| url.to_string()));
        Ok(())
    }

    fn find_texts(&self, query: &str) -> Result<Vec<String>, ScraperError> {
        if self.url.is_none() {
            return Err(ScraperError::NoPageLoaded);
        }
        self.runtime.block_on(async {
            let elements = self
                .page
                .find_elements(query)
                .await
                .map_err(|e| browser_error("querying elements", e))?;
            let mut texts = Vec::with_capacity(elements.len());
            for element in elements {
                let text = element
                    .inner_text()
                    .await
                    .map_err(|e| browser_error("reading element text", e))?;
                texts.push(text.unwrap_or_default().trim().to_string());
            }
            Ok::<_, ScraperError>(texts)
        })
    }

    fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        if let Err(e) = self.runtime.block_on(self.browser.close()) {
            tracing::debug!(error = %e, "browser close failed");
        }
        self.handler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::onlinereadfreebooks::OnlineReadFreeBooksWebsite;
    use crate::scraper::Website;

    #[test]
    #[ignore = "launches a local Chrome"]
    fn text_added_by_script_is_found_by_polling() -> Result<(), ScraperError> {
        let html = "<html><body><script>setTimeout(()=>{const d=document.createElement('div');\
d.id='content-text';d.textContent='Rendered late';document.body.appendChild(d);},300)</script></body></html>";
        let mut page = ChromePage::launch(false)?;
        page.navigate(&format!("data:text/html,{}", html.replace(' ', "%20")))?;
        assert_eq!(OnlineReadFreeBooksWebsite.get_text(&page)?, "Rendered late");
        Ok(())
    }

    #[test]
    #[ignore = "launches a local Chrome"]
    fn queries_before_navigation_have_no_document() -> Result<(), ScraperError> {
        let page = ChromePage::launch(false)?;
        assert!(matches!(page.find_texts("p"), Err(ScraperError::NoPageLoaded)));
        Ok(())
    }
}
