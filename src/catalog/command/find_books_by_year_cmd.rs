use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{parse_number, Command, CommandError};

pub(crate) struct FindBooksByYearCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl FindBooksByYearCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindBooksByYearCommandRequest {
    pub(crate) year: String,
}

impl FindBooksByYearCommandRequest {
    pub fn new(year: &str) -> Self {
        Self {
            year: year.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FindBooksByYearCommandResponse {
    pub books: Vec<BookDto>,
}

impl FindBooksByYearCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<FindBooksByYearCommandRequest, FindBooksByYearCommandResponse> for FindBooksByYearCommand {
    async fn execute(&self, req: FindBooksByYearCommandRequest) -> Result<FindBooksByYearCommandResponse, CommandError> {
        let year = parse_number("year", req.year.as_str())?;
        self.catalog_service.find_books_by_year(year).await
            .map_err(CommandError::from).map(FindBooksByYearCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::find_books_by_year_cmd::{FindBooksByYearCommand, FindBooksByYearCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_find_books_by_year() {
        let svc = factory::create_catalog_service(&Configuration::new("test"));
        let add_cmd = AddBookCommand::new(svc.clone());
        let find_cmd = FindBooksByYearCommand::new(svc);

        let books = vec![
            BookDto::new(5, "The Fellowship of the Ring", "Tolkien", 1954),
            BookDto::new(2, "Lord of the Flies", "Golding", 1954),
            BookDto::new(7, "Fahrenheit 451", "Bradbury", 1953),
        ];
        for book in &books {
            let _ = add_cmd.execute(AddBookCommandRequest::new(book)).await.expect("should add book");
        }

        let res = find_cmd.execute(FindBooksByYearCommandRequest::new("1954")).await.expect("should find books");
        assert_eq!(books[..2].to_vec(), res.books);
        let none = find_cmd.execute(FindBooksByYearCommandRequest::new("1800")).await.expect("should find books");
        assert!(none.books.is_empty());
        let bad = find_cmd.execute(FindBooksByYearCommandRequest::new("fifties")).await;
        assert!(matches!(bad, Err(CommandError::Validation { .. })));
    }
}
