use axum::{
    body::HttpBody,
    extract::{Path, State},
    response::Json,
    routing::get,
    BoxError,
    Router,
};
use serde_json::Value;
use tracing::debug;
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::find_books_by_author_cmd::{FindBooksByAuthorCommand, FindBooksByAuthorCommandRequest};
use crate::catalog::command::find_books_by_year_cmd::{FindBooksByYearCommand, FindBooksByYearCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

// Generic over the request body so the same routes serve plain HTTP and Lambda events.
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/books/author/:author_name", get(find_books_by_author))
        .route("/books/year/:year", get(find_books_by_year))
        .with_state(state)
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BookDto>, ServerError> {
    let book: BookDto = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    debug!(book_id = book.id, "adding book");
    let res = AddBookCommand::new(state.catalog).execute(AddBookCommandRequest::new(&book)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let res = GetBookCommand::new(state.catalog).execute(GetBookCommandRequest::new(book_id)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<BookDto>, ServerError> {
    let book: BookDto = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(book_id.as_str(), book);
    let res = UpdateBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let res = RemoveBookCommand::new(state.catalog).execute(RemoveBookCommandRequest::new(book_id)).await?;
    Ok(Json(res))
}

pub(crate) async fn find_books_by_author(
    State(state): State<AppState>,
    Path(author_name): Path<String>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let req = FindBooksByAuthorCommandRequest::new(author_name.as_str());
    let res = FindBooksByAuthorCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.books))
}

pub(crate) async fn find_books_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let req = FindBooksByYearCommandRequest::new(year.as_str());
    let res = FindBooksByYearCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.books))
}
