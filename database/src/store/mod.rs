use async_trait::async_trait;
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person, UpdatePersonData},
};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Stored document is missing an object id: {0}")]
    MissingId(String),

    #[error("In-memory store lock was poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Single document operations against the backing store. Every method is one round trip,
/// the store is responsible for per-document atomicity
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Inserts a new document, the store assigns the id
    async fn insert(&self, person: NewPerson) -> StoreResult<Person>;

    /// Returns at most `limit` documents in store order
    async fn list(&self, limit: i64) -> StoreResult<Vec<Person>>;

    async fn find(&self, id: &EntityId) -> StoreResult<Option<Person>>;

    /// Overwrites only the supplied fields and returns the document after the update,
    /// `None` when no document matches
    async fn update(&self, id: &EntityId, update: &UpdatePersonData)
        -> StoreResult<Option<Person>>;

    /// Returns whether a document was removed
    async fn delete(&self, id: &EntityId) -> StoreResult<bool>;
}
