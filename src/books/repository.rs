pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

pub(crate) const AUTHOR_KEY: &str = "author";
pub(crate) const YEAR_KEY: &str = "year";

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    async fn find_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>>;

    async fn find_by_year(&self, year: i64) -> LibraryResult<Vec<BookEntity>>;
}
