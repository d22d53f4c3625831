//! OnlineReadFreeBooks adapter. Pages live at `{base}{Name-Dash}-{number}/{page}`.

use crate::model::Book;
use crate::scraper::{ScraperError, Site, Website};

const TEXT_QUERY: &str = r#"div[id="content-text"]"#;

pub struct OnlineReadFreeBooksWebsite;

impl Website for OnlineReadFreeBooksWebsite {
    fn site(&self) -> Site {
        Site::OnlineReadFreeBooks
    }

    fn text_query(&self) -> &'static str {
        TEXT_QUERY
    }

    fn create_url(
        &self,
        book: &Book,
        page_number: u32,
        _total_pages: u32,
    ) -> Result<String, ScraperError> {
        let url = format!(
            "{}{}-{}/{}",
            Site::OnlineReadFreeBooks.base_url(),
            book.name_dash(),
            book.number(),
            page_number
        );
        tracing::debug!(%url, "built OnlineReadFreeBooks page URL");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::StaticPage;

    #[test]
    fn url_for_sample_book() -> Result<(), ScraperError> {
        let url = OnlineReadFreeBooksWebsite.create_url(&Book::new(12345, "My Book"), 3, 10)?;
        assert_eq!(url, "https://www.onlinereadfreebooks.com/en/My-Book-12345/3");
        Ok(())
    }

    #[test]
    fn url_for_known_book() -> Result<(), ScraperError> {
        let book = Book::new(346891, "Mistborn Secret History");
        assert_eq!(
            OnlineReadFreeBooksWebsite.create_url(&book, 2, 30)?,
            "https://www.onlinereadfreebooks.com/en/Mistborn-Secret-History-346891/2"
        );
        Ok(())
    }

    #[test]
    fn text_from_content_div() -> Result<(), ScraperError> {
        let page = StaticPage::with_url(
            "https://www.onlinereadfreebooks.com/en/Mistborn-Secret-History-346891/1",
            r#"<html><body><div id="content-text">Kelsier<br>woke.<script>track()</script></div></body></html>"#,
        );
        assert_eq!(OnlineReadFreeBooksWebsite.get_text(&page)?, "Kelsier\nwoke.");
        Ok(())
    }

    #[test]
    fn whitespace_only_content_is_empty_not_an_error() -> Result<(), ScraperError> {
        let page = StaticPage::from_html("<div id=\"content-text\">  \n  </div>");
        assert_eq!(OnlineReadFreeBooksWebsite.get_text(&page)?, "");
        Ok(())
    }
}
