use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, failing if its id is already taken
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // replaces the entity stored under id
    async fn update(&self, id: i64, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // all entities in insertion order
    async fn list(&self) -> LibraryResult<Vec<Entity>>;

    // entities matching every field of the predicate, in insertion order
    async fn query(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<Entity>>;

    async fn len(&self) -> LibraryResult<usize>;
}
