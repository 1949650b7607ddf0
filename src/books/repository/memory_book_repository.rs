use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{AUTHOR_KEY, BookRepository, YEAR_KEY};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// Shelf holds books in insertion order plus an index from book id to position.
#[derive(Debug, Default)]
struct Shelf {
    books: Vec<BookEntity>,
    positions: HashMap<i64, usize>,
}

impl Shelf {
    fn position(&self, id: i64) -> LibraryResult<usize> {
        self.positions.get(&id).copied()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, book) in self.books.iter().enumerate().skip(start) {
            self.positions.insert(book.book_id, pos);
        }
    }
}

enum Criterion {
    Author(String),
    Year(i64),
}

impl Criterion {
    fn parse(predicate: &HashMap<String, String>) -> LibraryResult<Vec<Criterion>> {
        predicate.iter().map(|(k, v)| {
            match k.as_str() {
                AUTHOR_KEY => Ok(Criterion::Author(v.to_string())),
                YEAR_KEY => v.trim().parse::<i64>().map(Criterion::Year).map_err(|_| {
                    LibraryError::validation(format!("year must be an integer but was {:?}", v).as_str(),
                                             Some(YEAR_KEY.to_string()))
                }),
                other => Err(LibraryError::validation(
                    format!("books cannot be filtered by {}", other).as_str(), Some(other.to_string()))),
            }
        }).collect()
    }

    fn matches(&self, book: &BookEntity) -> bool {
        match self {
            Criterion::Author(author) => book.is_written_by(author),
            Criterion::Year(year) => book.is_published_in(*year),
        }
    }
}

// MemoryBookRepository serializes every operation on the catalog through one lock, so
// each check-then-act (e.g. duplicate check and append) is atomic.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    shelf: RwLock<Shelf>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            shelf: RwLock::new(Shelf::default()),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut shelf = self.shelf.write().await;
        if shelf.positions.contains_key(&entity.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("book {} already exists", entity.book_id).as_str()));
        }
        let pos = shelf.books.len();
        shelf.books.push(entity.clone());
        shelf.positions.insert(entity.book_id, pos);
        debug!("stored book {} at {}", entity.book_id, pos);
        Ok(entity.clone())
    }

    async fn update(&self, id: i64, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut shelf = self.shelf.write().await;
        let pos = shelf.position(id)?;
        let rekeyed = entity.book_id != id;
        if rekeyed && shelf.positions.contains_key(&entity.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("cannot move book {} to {}, id already exists", id, entity.book_id).as_str()));
        }
        shelf.books[pos] = entity.clone();
        if rekeyed {
            shelf.positions.remove(&id);
            shelf.positions.insert(entity.book_id, pos);
            debug!("re-keyed book {} to {}", id, entity.book_id);
        }
        Ok(entity.clone())
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let shelf = self.shelf.read().await;
        let pos = shelf.position(id)?;
        Ok(shelf.books[pos].clone())
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let mut shelf = self.shelf.write().await;
        let pos = shelf.position(id)?;
        shelf.books.remove(pos);
        shelf.positions.remove(&id);
        shelf.reindex_from(pos);
        Ok(1)
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.shelf.read().await.books.clone())
    }

    async fn query(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<BookEntity>> {
        let criteria = Criterion::parse(predicate)?;
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter()
            .filter(|b| criteria.iter().all(|c| c.matches(b)))
            .cloned()
            .collect())
    }

    async fn len(&self) -> LibraryResult<usize> {
        Ok(self.shelf.read().await.books.len())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_author(&self, author: &str) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            (AUTHOR_KEY.to_string(), author.to_string()),
        ]);
        self.query(&predicate).await
    }

    async fn find_by_year(&self, year: i64) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            (YEAR_KEY.to_string(), year.to_string()),
        ]);
        self.query(&predicate).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use rand::seq::SliceRandom;
    use rand::Rng;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;

    async fn add_test_books(books_repo: &MemoryBookRepository) -> Vec<BookEntity> {
        let books = vec![
            BookEntity::new(1, "The Hobbit", "Tolkien", 1937),
            BookEntity::new(2, "1984", "Orwell", 1949),
            BookEntity::new(3, "The Fellowship of the Ring", "TOLKIEN", 1954),
            BookEntity::new(4, "Animal Farm", "orwell", 1945).with_description("a fable"),
            BookEntity::new(5, "The Two Towers", "Tolkien", 1954),
        ];
        for book in &books {
            let stored = books_repo.create(book).await.expect("should create book");
            assert_eq!(book, &stored);
        }
        books
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new(1, "1984", "Orwell", 1949);
        let stored = books_repo.create(&book).await.expect("should create book");
        assert_eq!(book, stored);

        let loaded = books_repo.get(1).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_list_in_insertion_order() {
        let books_repo = MemoryBookRepository::new();
        let mut ids: Vec<i64> = (0..50).map(|i| i * 7 - 100).collect();
        ids.shuffle(&mut rand::thread_rng());
        for id in &ids {
            let book = BookEntity::new(*id, format!("title_{}", id).as_str(), "author", 2000 + id % 5);
            books_repo.create(&book).await.expect("should create book");
        }
        let listed = books_repo.list().await.expect("should list books");
        assert_eq!(ids, listed.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        assert_eq!(listed, books_repo.list().await.expect("should list books again"));
        for book in &listed {
            assert_eq!(book, &books_repo.get(book.book_id).await.expect("should return book"));
        }
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_books() {
        let books_repo = MemoryBookRepository::new();
        let books = add_test_books(&books_repo).await;

        let dup = BookEntity::new(2, "Homage to Catalonia", "Orwell", 1938);
        let res = books_repo.create(&dup).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(books, books_repo.list().await.expect("should list books"));
    }

    #[tokio::test]
    async fn test_should_fail_missing_books_without_mutation() {
        let books_repo = MemoryBookRepository::new();
        let books = add_test_books(&books_repo).await;

        assert!(matches!(books_repo.get(42).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(books_repo.update(42, &BookEntity::new(42, "x", "y", 1)).await,
                         Err(LibraryError::NotFound { .. })));
        assert!(matches!(books_repo.delete(42).await, Err(LibraryError::NotFound { .. })));
        assert_eq!(books, books_repo.list().await.expect("should list books"));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = MemoryBookRepository::new();
        let _ = add_test_books(&books_repo).await;

        let replacement = BookEntity::new(2, "Nineteen Eighty-Four", "George Orwell", 1949);
        let stored = books_repo.update(2, &replacement).await.expect("should update book");
        assert_eq!(replacement, stored);

        let loaded = books_repo.get(2).await.expect("should return book");
        assert_eq!(replacement, loaded);
        // whole-record replacement drops the old description too
        let replacement = BookEntity::new(4, "Animal Farm", "Orwell", 1945);
        books_repo.update(4, &replacement).await.expect("should update book");
        assert_eq!(None, books_repo.get(4).await.expect("should return book").description);

        let ids: Vec<i64> = books_repo.list().await.expect("should list books").iter().map(|b| b.book_id).collect();
        assert_eq!(vec![1, 2, 3, 4, 5], ids);
    }

    #[tokio::test]
    async fn test_should_rekey_on_update() {
        let books_repo = MemoryBookRepository::new();
        let _ = add_test_books(&books_repo).await;

        let moved = BookEntity::new(20, "1984", "Orwell", 1949);
        books_repo.update(2, &moved).await.expect("should update book");
        assert!(matches!(books_repo.get(2).await, Err(LibraryError::NotFound { .. })));
        assert_eq!(moved, books_repo.get(20).await.expect("should return book"));
        let ids: Vec<i64> = books_repo.list().await.expect("should list books").iter().map(|b| b.book_id).collect();
        assert_eq!(vec![1, 20, 3, 4, 5], ids);

        let before = books_repo.list().await.expect("should list books");
        let clash = BookEntity::new(3, "1984", "Orwell", 1949);
        assert!(matches!(books_repo.update(20, &clash).await, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(before, books_repo.list().await.expect("should list books"));
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = MemoryBookRepository::new();
        let _ = add_test_books(&books_repo).await;

        let deleted = books_repo.delete(2).await.expect("should delete book");
        assert_eq!(1, deleted);
        assert_eq!(4, books_repo.len().await.expect("should count books"));
        assert!(books_repo.get(2).await.is_err());

        // positions after the removed slot must still resolve
        assert_eq!(5, books_repo.get(5).await.expect("should return book").book_id);
        books_repo.delete(5).await.expect("should delete book");
        books_repo.delete(1).await.expect("should delete book");
        let ids: Vec<i64> = books_repo.list().await.expect("should list books").iter().map(|b| b.book_id).collect();
        assert_eq!(vec![3, 4], ids);

        books_repo.create(&BookEntity::new(2, "1984", "Orwell", 1949)).await.expect("should recreate book");
        assert_eq!(2, books_repo.get(2).await.expect("should return book").book_id);
    }

    #[tokio::test]
    async fn test_should_find_by_author() {
        let books_repo = MemoryBookRepository::new();
        let _ = add_test_books(&books_repo).await;

        let lower = books_repo.find_by_author("tolkien").await.expect("should find books");
        let upper = books_repo.find_by_author("TOLKIEN").await.expect("should find books");
        assert_eq!(lower, upper);
        assert_eq!(vec![1, 3, 5], lower.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        assert!(books_repo.find_by_author("Austen").await.expect("should find books").is_empty());
    }

    #[tokio::test]
    async fn test_should_find_by_year() {
        let books_repo = MemoryBookRepository::new();
        let books = add_test_books(&books_repo).await;

        for year in [1937, 1945, 1949, 1954, 2024] {
            let expected: Vec<BookEntity> = books.iter().filter(|b| b.year == year).cloned().collect();
            assert_eq!(expected, books_repo.find_by_year(year).await.expect("should find books"));
        }
    }

    #[tokio::test]
    async fn test_should_query_books() {
        let books_repo = MemoryBookRepository::new();
        let _ = add_test_books(&books_repo).await;

        let predicate = HashMap::from([
            ("author".to_string(), "Tolkien".to_string()),
            ("year".to_string(), "1954".to_string()),
        ]);
        let res = books_repo.query(&predicate).await.expect("should return books");
        assert_eq!(vec![3, 5], res.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        assert_eq!(5, books_repo.query(&HashMap::new()).await.expect("should return books").len());

        let bad_year = HashMap::from([("year".to_string(), "fifties".to_string())]);
        assert!(matches!(books_repo.query(&bad_year).await, Err(LibraryError::Validation { .. })));
        let bad_key = HashMap::from([("isbn".to_string(), "123".to_string())]);
        assert!(matches!(books_repo.query(&bad_key).await, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_serialize_concurrent_creates() {
        let books_repo = Arc::new(MemoryBookRepository::new());
        let mut handles = vec![];
        for i in 0..64_i64 {
            let repo = books_repo.clone();
            handles.push(tokio::spawn(async move {
                let distinct = repo.create(&BookEntity::new(i, "distinct", "author", 2000)).await.is_ok();
                let year = rand::thread_rng().gen_range(1900..2000);
                let shared = repo.create(&BookEntity::new(-1, "shared", "author", year)).await.is_ok();
                (distinct, shared)
            }));
        }
        let mut shared_wins = 0;
        for handle in handles {
            let (distinct, shared) = handle.await.expect("task should finish");
            assert!(distinct);
            if shared {
                shared_wins += 1;
            }
        }
        assert_eq!(1, shared_wins);
        assert_eq!(65, books_repo.len().await.expect("should count books"));
    }
}
