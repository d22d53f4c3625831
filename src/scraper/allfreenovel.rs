//! AllFreeNovel adapter. Pages live at `{base}{number}/page-{page}-{Name-Dash}/{page}/{total}`.

use crate::model::Book;
use crate::scraper::{ScraperError, Site, Website};

/// Paragraphs carrying exactly this class list hold the story text.
const TEXT_QUERY: &str = r#"p[class="storyText story-text"]"#;

pub struct AllFreeNovelWebsite;

impl Website for AllFreeNovelWebsite {
    fn site(&self) -> Site {
        Site::AllFreeNovel
    }

    fn text_query(&self) -> &'static str {
        TEXT_QUERY
    }

    fn create_url(
        &self,
        book: &Book,
        page_number: u32,
        total_pages: u32,
    ) -> Result<String, ScraperError> {
        let url = format!(
            "{}{}/page-{}-{}/{}/{}",
            Site::AllFreeNovel.base_url(),
            book.number(),
            page_number,
            book.name_dash(),
            page_number,
            total_pages
        );
        tracing::debug!(%url, "built AllFreeNovel page URL");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::StaticPage;

    #[test]
    fn url_for_sample_book() -> Result<(), ScraperError> {
        let url = AllFreeNovelWebsite.create_url(&Book::new(12345, "My Book"), 3, 10)?;
        assert_eq!(
            url,
            "https://www.allfreenovel.com/Page/Story/12345/page-3-My-Book/3/10"
        );
        Ok(())
    }

    #[test]
    fn page_past_total_is_not_checked() -> Result<(), ScraperError> {
        let url = AllFreeNovelWebsite.create_url(&Book::new("9", "A"), 20, 10)?;
        assert!(url.ends_with("/9/page-20-A/20/10"));
        Ok(())
    }

    #[test]
    fn text_joins_story_paragraphs() -> Result<(), ScraperError> {
        let page = StaticPage::from_html(
            r#"<html><body>
<p class="storyText">not this one</p>
<p class="storyText story-text">It was a dark night.</p>
<div class="ads">Buy now</div>
<p class="storyText story-text">The   rain <i>kept</i> falling.</p>
</body></html>"#,
        );
        let text = AllFreeNovelWebsite.get_text(&page)?;
        assert_eq!(text, "It was a dark night.\nThe rain kept falling.");
        Ok(())
    }

    #[test]
    fn empty_paragraphs_give_empty_text() -> Result<(), ScraperError> {
        let page = StaticPage::from_html(r#"<p class="storyText story-text"></p>"#);
        assert_eq!(AllFreeNovelWebsite.get_text(&page)?, "");
        Ok(())
    }

    #[test]
    fn drops_characters_outside_latin1() -> Result<(), ScraperError> {
        let page = StaticPage::from_html(
            "<p class=\"storyText story-text\">\u{201c}Caf\u{e9}\u{201d} \u{2014} fine</p>",
        );
        assert_eq!(AllFreeNovelWebsite.get_text(&page)?, "Caf\u{e9}  fine");
        Ok(())
    }
}
