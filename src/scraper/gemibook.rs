//! GemiBook adapter.
//!
//! Page URLs look like `https://gemibook.com/project-hail-mary/p-1-10077539`: the
//! slug is the lowercased dashed name, and the trailing number is the book id
//! offset by the page (`number + page - 1`).

use crate::model::Book;
use crate::scraper::{ScraperError, Site, Website};

const TEXT_QUERY: &str = r#"div[class="chapter-content"]"#;

pub struct GemiBookWebsite;

fn page_id(book: &Book, page_number: u32) -> Result<i64, ScraperError> {
    let malformed = |reason: String| ScraperError::MalformedBook {
        number: book.number().to_string(),
        reason,
    };
    let number: i64 = book
        .number()
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| malformed(e.to_string()))?;
    number
        .checked_add(i64::from(page_number) - 1)
        .ok_or_else(|| malformed("page id overflows".to_string()))
}

impl Website for GemiBookWebsite {
    fn site(&self) -> Site {
        Site::GemiBook
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
        let id = page_id(book, page_number)?;
        let url = format!(
            "{}{}/p-{}-{}",
            Site::GemiBook.base_url(),
            book.name_dash().to_lowercase(),
            page_number,
            id
        );
        tracing::debug!(%url, "built GemiBook page URL");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::StaticPage;

    #[test]
    fn url_for_sample_book() -> Result<(), ScraperError> {
        let url = GemiBookWebsite.create_url(&Book::new(12345, "My Book"), 3, 10)?;
        assert_eq!(url, "https://gemibook.com/my-book/p-3-12347");
        Ok(())
    }

    #[test]
    fn first_page_keeps_the_book_id() -> Result<(), ScraperError> {
        let url = GemiBookWebsite.create_url(&Book::new("10077539", "Project Hail Mary"), 1, 1)?;
        assert_eq!(url, "https://gemibook.com/project-hail-mary/p-1-10077539");
        Ok(())
    }

    #[test]
    fn non_numeric_identifier_is_malformed() {
        match GemiBookWebsite.create_url(&Book::new("abc", "X"), 1, 1) {
            Err(ScraperError::MalformedBook { number, .. }) => assert_eq!(number, "abc"),
            other => panic!("expected MalformedBook, got {:?}", other),
        }
    }

    #[test]
    fn largest_identifier_on_first_page_fits() -> Result<(), ScraperError> {
        let url = GemiBookWebsite.create_url(&Book::new(i64::MAX, "X"), 1, 1)?;
        assert_eq!(url, format!("https://gemibook.com/x/p-1-{}", i64::MAX));
        Ok(())
    }

    #[test]
    fn overflowing_identifier_is_malformed() {
        let book = Book::new(i64::MAX, "X");
        assert!(matches!(
            GemiBookWebsite.create_url(&book, 2, 2),
            Err(ScraperError::MalformedBook { .. })
        ));
    }

    #[test]
    fn text_from_chapter_content() -> Result<(), ScraperError> {
        let page = StaticPage::from_html(
            r#"<div class="chapter-content"><p>Line one.</p><p>Line two.</p></div>
<div class="chapter-content extra">skipped</div>"#,
        );
        assert_eq!(GemiBookWebsite.get_text(&page)?, "Line one.\nLine two.");
        Ok(())
    }
}
