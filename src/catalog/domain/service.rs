use std::collections::HashMap;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

const EVENT_NAME: &str = "books";
const EVENT_GROUP: &str = "catalog";

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
    metadata: HashMap<String, String>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            book_repository,
            events_publisher,
            metadata: HashMap::from([("branch".to_string(), config.branch_id.to_string())]),
        }
    }

    // The change is already applied when this runs, so a failed publish is only logged.
    async fn notify(&self, event: LibraryResult<DomainEvent>) {
        let res = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(err),
        };
        if let Err(err) = res {
            warn!("failed to publish catalog event: {}", err);
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let stored = self.book_repository.create(&BookEntity::from(book)).await.map(|b| BookDto::from(&b))?;
        info!(book_id = stored.id, "added book");
        self.notify(DomainEvent::added(
            EVENT_NAME, EVENT_GROUP, stored.id.to_string().as_str(), &self.metadata, &stored)).await;
        Ok(stored)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let _ = self.book_repository.delete(id).await?;
        info!(book_id = id, "removed book");
        self.notify(DomainEvent::deleted(
            EVENT_NAME, EVENT_GROUP, id.to_string().as_str(), &self.metadata, &id)).await;
        Ok(())
    }

    async fn update_book(&self, id: i64, book: &BookDto) -> LibraryResult<BookDto> {
        let stored = self.book_repository.update(id, &BookEntity::from(book)).await.map(|b| BookDto::from(&b))?;
        info!(book_id = id, new_book_id = stored.id, "updated book");
        // events are keyed by where the book lives now; a re-keyed book also carries its old id
        let mut metadata = self.metadata.clone();
        if stored.id != id {
            metadata.insert("previous_key".to_string(), id.to_string());
        }
        self.notify(DomainEvent::updated(
            EVENT_NAME, EVENT_GROUP, stored.id.to_string().as_str(), &metadata, &stored)).await;
        Ok(stored)
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.list().await?;
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn find_books_by_author(&self, author: &str) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.find_by_author(author).await?;
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn find_books_by_year(&self, year: i64) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.find_by_year(year).await?;
        Ok(res.iter().map(BookDto::from).collect())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            description: other.description.clone(),
            year: other.year,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            description: other.description.clone(),
            year: other.year,
        }
    }
}
