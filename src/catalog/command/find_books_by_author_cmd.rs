use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct FindBooksByAuthorCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl FindBooksByAuthorCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindBooksByAuthorCommandRequest {
    pub(crate) author: String,
}

impl FindBooksByAuthorCommandRequest {
    pub fn new(author: &str) -> Self {
        Self {
            author: author.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FindBooksByAuthorCommandResponse {
    pub books: Vec<BookDto>,
}

impl FindBooksByAuthorCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<FindBooksByAuthorCommandRequest, FindBooksByAuthorCommandResponse> for FindBooksByAuthorCommand {
    async fn execute(&self, req: FindBooksByAuthorCommandRequest) -> Result<FindBooksByAuthorCommandResponse, CommandError> {
        self.catalog_service.find_books_by_author(req.author.as_str()).await
            .map_err(CommandError::from).map(FindBooksByAuthorCommandResponse::new)
    }
}
