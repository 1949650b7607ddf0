use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;

// BookEntity is the value held by the catalog store; readers only ever get clones of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub year: i64,
}

impl BookEntity {
    pub fn new(book_id: i64, title: &str, author: &str, year: i64) -> Self {
        Self {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            description: None,
            year,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn year(&self) -> i64 {
        self.year
    }
}
