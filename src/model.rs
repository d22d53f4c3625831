//! Book identity used to build page URLs, and the extracted-page record.

use crate::scraper::Site;
use serde::Serialize;
use std::fmt::Display;

/// A book as the hosting sites address it: an identifier plus a display name.
///
/// `name_underscore` and `name_dash` are derived from `name` once, at
/// construction. There is no setter, so they always agree with `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    number: String,
    name: String,
    name_underscore: String,
    name_dash: String,
}

impl Book {
    /// Build a book from any displayable identifier (`12345` or `"12345"`) and a name.
    pub fn new(number: impl Display, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            number: number.to_string(),
            name_underscore: name.replace(' ', "_"),
            name_dash: name.replace(' ', "-"),
            name,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with every space replaced by `_`.
    pub fn name_underscore(&self) -> &str {
        &self.name_underscore
    }

    /// Name with every space replaced by `-`.
    pub fn name_dash(&self) -> &str {
        &self.name_dash
    }
}

/// One extracted page, as written by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct PageText {
    pub site: Site,
    pub book: Book,
    pub url: String,
    pub page: u32,
    pub total_pages: u32,
    pub text: String,
}
