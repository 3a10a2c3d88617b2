use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, rejecting an existing key
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // overwrite an existing entity, rejecting an absent key
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity by key
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity by key, rejecting an absent key
    async fn delete(&self, id: &str) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
}
