use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use crate::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person, UpdatePersonData},
};

use super::{PersonStore, StoreError, StoreResult};

/// Stored shape of a person, `_id` stays internal to this module
#[derive(Serialize, Deserialize, Debug)]
struct PersonDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    last_name: String,
    email: String,
    address: String,
}

impl PersonDocument {
    fn from_new(person: NewPerson) -> Self {
        PersonDocument {
            id: None,
            name: person.name,
            last_name: person.last_name,
            email: person.email,
            address: person.address,
        }
    }

    fn into_person(self) -> StoreResult<Person> {
        let id = self
            .id
            .ok_or_else(|| StoreError::MissingId(format!("{} {}", self.name, self.last_name)))?;

        Ok(Person {
            id: EntityId(id),
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            address: self.address,
        })
    }
}

pub struct MongoStore {
    collection: Collection<PersonDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;

        log::info!("Connected to document store, using {}.{}", database, collection);

        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }
}

#[async_trait]
impl PersonStore for MongoStore {
    async fn insert(&self, person: NewPerson) -> StoreResult<Person> {
        let result = self
            .collection
            .insert_one(PersonDocument::from_new(person.clone()), None)
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::MissingId(result.inserted_id.to_string()))?;

        Ok(Person::from_new(EntityId(id), person))
    }

    async fn list(&self, limit: i64) -> StoreResult<Vec<Person>> {
        let options = FindOptions::builder().limit(limit).build();

        let documents: Vec<PersonDocument> = self
            .collection
            .find(None, options)
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(PersonDocument::into_person)
            .collect()
    }

    async fn find(&self, id: &EntityId) -> StoreResult<Option<Person>> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.to_object_id() }, None)
            .await?;

        document.map(PersonDocument::into_person).transpose()
    }

    async fn update(
        &self,
        id: &EntityId,
        update: &UpdatePersonData,
    ) -> StoreResult<Option<Person>> {
        // Absent fields are skipped during serialization, so `$set` only names supplied fields
        let fields = to_document(update)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let document = self
            .collection
            .find_one_and_update(
                doc! { "_id": id.to_object_id() },
                doc! { "$set": fields },
                options,
            )
            .await?;

        document.map(PersonDocument::into_person).transpose()
    }

    async fn delete(&self, id: &EntityId) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_object_id() }, None)
            .await?;

        Ok(result.deleted_count == 1)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;

    #[test]
    fn new_documents_leave_id_to_the_store() {
        let document = to_document(&PersonDocument::from_new(NewPerson::new_test())).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("email").unwrap(), "ana@x.com");
    }

    #[test]
    fn update_document_only_names_supplied_fields() {
        let update = UpdatePersonData {
            address: Some("Rua B, 2".to_string()),
            ..Default::default()
        };

        let document = to_document(&update).unwrap();

        assert_eq!(document.len(), 1);
        assert_eq!(
            document.get("address"),
            Some(&Bson::String("Rua B, 2".to_string()))
        );
    }

    #[test]
    fn stored_id_maps_to_public_id() {
        let object_id = ObjectId::new();

        let person = PersonDocument {
            id: Some(object_id),
            ..PersonDocument::from_new(NewPerson::new_test())
        }
        .into_person()
        .unwrap();

        assert_eq!(person.id.to_string(), object_id.to_hex());
    }

    #[test]
    fn document_without_id_is_an_error() {
        let result = PersonDocument::from_new(NewPerson::new_test()).into_person();

        assert!(matches!(result, Err(StoreError::MissingId(_))));
    }
}
