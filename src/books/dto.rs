use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

// BookDto is the catalog's wire representation of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub year: i64,
}

impl BookDto {
    pub fn new(id: i64, title: &str, author: &str, year: i64) -> BookDto {
        BookDto {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: None,
            year,
        }
    }

    pub fn with_description(mut self, description: &str) -> BookDto {
        self.description = Some(description.to_string());
        self
    }

    // Checks the fields serde cannot: a title of only whitespace is treated as missing.
    pub fn validate(&self) -> LibraryResult<()> {
        if self.title.trim().is_empty() {
            return Err(LibraryError::validation(
                format!("title of book {} must not be empty", self.id).as_str(), Some("title".to_string())));
        }
        Ok(())
    }
}
