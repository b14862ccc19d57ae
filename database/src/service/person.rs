use std::sync::Arc;

use thiserror::Error;

use crate::{
    consts::consts::{EntityId, MAX_LIST_SIZE},
    model::{
        person::{NewPerson, Person, PersonCollection, UpdatePersonData},
        validation::ValidationError,
    },
    store::{PersonStore, StoreError},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation failed, {0}")]
    Validation(#[from] ValidationError),

    #[error("person {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Goal of the person service is to provide a simple interface for the five person operations
///
/// 1. Input is validated before the store is touched
/// 2. String ids are parsed into the store's identifier, a malformed id is treated as not found
/// 3. Each operation is a single store call, except an update with no fields which falls back to a get
///
/// Store errors are not retried, they are logged and returned to the caller
#[derive(Clone)]
pub struct PersonService {
    store: Arc<dyn PersonStore>,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, person: NewPerson) -> ServiceResult<Person> {
        person.validate()?;

        let person = self.store.insert(person).await.map_err(log_store_error)?;

        log::info!("Created person {}", person.id);

        Ok(person)
    }

    pub async fn list(&self) -> ServiceResult<PersonCollection> {
        let persons = self
            .store
            .list(MAX_LIST_SIZE)
            .await
            .map_err(log_store_error)?;

        log::debug!("Listed {} persons", persons.len());

        Ok(PersonCollection { persons })
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Person> {
        let entity_id = parse_id(id)?;

        self.store
            .find(&entity_id)
            .await
            .map_err(log_store_error)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn update(&self, id: &str, update: UpdatePersonData) -> ServiceResult<Person> {
        update.validate()?;

        let entity_id = parse_id(id)?;

        // An empty update still succeeds and returns the current record
        if update.is_empty() {
            log::debug!("Empty update for person {}, returning current record", id);

            return self.get(id).await;
        }

        let person = self
            .store
            .update(&entity_id, &update)
            .await
            .map_err(log_store_error)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        log::info!("Updated person {}", person.id);

        Ok(person)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let entity_id = parse_id(id)?;

        if !self
            .store
            .delete(&entity_id)
            .await
            .map_err(log_store_error)?
        {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        log::info!("Deleted person {}", entity_id);

        Ok(())
    }
}

fn parse_id(id: &str) -> ServiceResult<EntityId> {
    EntityId::parse(id).map_err(|e| {
        log::debug!("{}", e);
        ServiceError::NotFound(id.to_string())
    })
}

fn log_store_error(error: StoreError) -> StoreError {
    log::error!("Store request failed: {}", error);
    error
}
