//! Catalog search matching.

use crate::model::Book;

/// A catalog search: text matched against title or author, optionally
/// narrowed to one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    text: String,
    category: Option<String>,
}

impl BookQuery {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().to_lowercase(),
            category: None,
        }
    }

    /// Require an exact, case-insensitive category. Empty means no filter.
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        let text_hit = book.title.to_lowercase().contains(&self.text)
            || book.author.to_lowercase().contains(&self.text);
        if !text_hit {
            return false;
        }
        match &self.category {
            Some(wanted) => book.category.to_lowercase() == *wanted,
            None => true,
        }
    }
}
