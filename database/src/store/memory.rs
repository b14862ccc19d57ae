use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person, UpdatePersonData},
};

use super::{PersonStore, StoreError, StoreResult};

/// In-process store with the same single-document semantics as the document store.
/// Records are kept in insertion order, which is the order `list` returns
#[derive(Default)]
pub struct MemoryStore {
    people: Mutex<Vec<Person>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Person>>> {
        self.people.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        let person = Person::from_new(EntityId::new(), person);

        self.lock()?.push(person.clone());

        Ok(person)
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<Person>> {
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self.lock()?.iter().take(limit).cloned().collect())
    }

    async fn find(&self, id: &EntityId) -> StoreResult<Option<Person>> {
        Ok(self.lock()?.iter().find(|person| &person.id == id).cloned())
    }

    async fn update(
        &self,
        id: &EntityId,
        update: &UpdatePersonData,
    ) -> StoreResult<Option<Person>> {
        let mut people = self.lock()?;

        let updated = people.iter_mut().find(|person| &person.id == id).map(|person| {
            person.apply_update(update);
            person.clone()
        });

        Ok(updated)
    }

    async fn delete(&self, id: &EntityId) -> StoreResult<bool> {
        let mut people = self.lock()?;
        let count = people.len();

        people.retain(|person| &person.id != id);

        Ok(people.len() != count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_respects_limit_and_insertion_order() {
        let store = MemoryStore::new();

        let first = store.insert(NewPerson::new_test()).await.unwrap();
        let second = store.insert(NewPerson::new_test()).await.unwrap();
        store.insert(NewPerson::new_test()).await.unwrap();

        let people = store.list(2).await.unwrap();

        assert_eq!(people, vec![first, second]);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = MemoryStore::new();
        let person = store.insert(NewPerson::new_test()).await.unwrap();

        assert!(store.delete(&person.id).await.unwrap());
        assert!(!store.delete(&person.id).await.unwrap());
        assert_eq!(store.find(&person.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_none() {
        let store = MemoryStore::new();

        let result = store
            .update(&EntityId::new(), &UpdatePersonData::default())
            .await
            .unwrap();

        assert_eq!(result, None);
    }
}
