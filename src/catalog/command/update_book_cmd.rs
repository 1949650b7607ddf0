use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{parse_number, Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// The payload replaces the whole record; its id may differ from book_id, which re-keys
// the record unless the new id is already taken.
#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: String,
    pub book: BookDto,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: &str, book: BookDto) -> Self {
        Self {
            book_id: book_id.to_string(),
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book_id = parse_number("book_id", req.book_id.as_str())?;
        req.book.validate()?;
        self.catalog_service.update_book(book_id, &req.book).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
