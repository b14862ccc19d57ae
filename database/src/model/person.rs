use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::consts::consts::EntityId;

use super::validation::{require_non_empty, validate_email, ValidationError};

/// A stored person, as returned to clients
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[schema(example = json!({
    "id": "65a1f0c2b3d4e5f601234567",
    "name": "Leticia",
    "last_name": "Zimerer",
    "email": "leticiazimerer@gmail.com",
    "address": "Avenida Paulista, 537"
}))]
pub struct Person {
    #[schema(value_type = String)]
    pub id: EntityId,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
}

impl Person {
    pub fn from_new(id: EntityId, person: NewPerson) -> Self {
        Person {
            id,
            name: person.name,
            last_name: person.last_name,
            email: person.email,
            address: person.address,
        }
    }

    /// Merge update, only the supplied fields are overwritten
    pub fn apply_update(&mut self, update: &UpdatePersonData) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }

        if let Some(last_name) = &update.last_name {
            self.last_name = last_name.clone();
        }

        if let Some(email) = &update.email {
            self.email = email.clone();
        }

        if let Some(address) = &update.address {
            self.address = address.clone();
        }
    }
}

/// Create payload, the id is always assigned by the store
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[schema(example = json!({
    "name": "Leticia",
    "last_name": "Zimerer",
    "email": "leticiazimerer@gmail.com",
    "address": "Avenida Paulista, 537"
}))]
pub struct NewPerson {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
}

impl NewPerson {
    pub fn new(name: &str, last_name: &str, email: &str, address: &str) -> Self {
        NewPerson {
            name: name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        }
    }

    pub fn new_test() -> Self {
        NewPerson::new("Ana", "Lima", "ana@x.com", "Rua A, 1")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("last_name", &self.last_name)?;
        validate_email("email", &self.email)?;
        require_non_empty("address", &self.address)?;

        Ok(())
    }
}

/// Partial update payload. Absent and `null` both mean "leave unchanged"
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[schema(example = json!({
    "name": "Leticia",
    "last_name": "Zimerer",
    "email": "leticiazimerer@gmail.com",
    "address": "Avenida Paulista, 537"
}))]
pub struct UpdatePersonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UpdatePersonData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }

        if let Some(last_name) = &self.last_name {
            require_non_empty("last_name", last_name)?;
        }

        if let Some(email) = &self.email {
            validate_email("email", email)?;
        }

        if let Some(address) = &self.address {
            require_non_empty("address", address)?;
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
pub struct PersonCollection {
    pub persons: Vec<Person>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_only_touches_supplied_fields() {
        let mut person = Person::from_new(EntityId::new(), NewPerson::new_test());
        let before = person.clone();

        person.apply_update(&UpdatePersonData {
            address: Some("Rua B, 2".to_string()),
            ..Default::default()
        });

        assert_eq!(person.address, "Rua B, 2");
        assert_eq!(person.name, before.name);
        assert_eq!(person.last_name, before.last_name);
        assert_eq!(person.email, before.email);
        assert_eq!(person.id, before.id);
    }

    #[test]
    fn null_fields_count_as_absent() {
        let update: UpdatePersonData =
            serde_json::from_str(r#"{"name": null, "email": null}"#).unwrap();

        assert!(update.is_empty());
    }

    #[test]
    fn create_payload_ignores_client_supplied_id() {
        let person: NewPerson = serde_json::from_str(
            r#"{"id": "65a1f0c2b3d4e5f601234567", "name": "Ana", "last_name": "Lima",
                "email": "ana@x.com", "address": "Rua A, 1"}"#,
        )
        .unwrap();

        assert_eq!(person, NewPerson::new_test());
    }

    #[test]
    fn create_validation_reports_field() {
        let mut person = NewPerson::new_test();
        person.email = "not-an-email".to_string();

        let err = person.validate().expect_err("email should be rejected");

        assert_eq!(err.field, "email");
    }

    #[test]
    fn update_validation_checks_supplied_email() {
        let update = UpdatePersonData {
            email: Some("nope".to_string()),
            ..Default::default()
        };

        assert!(update.validate().is_err());
        assert!(UpdatePersonData::default().validate().is_ok());
    }

    #[test]
    fn person_output_uses_public_field_names() {
        let id = EntityId::parse("65a1f0c2b3d4e5f601234567").unwrap();
        let person = Person::from_new(id, NewPerson::new_test());

        assert_eq!(
            serde_json::to_value(&person).unwrap(),
            serde_json::json!({
                "id": "65a1f0c2b3d4e5f601234567",
                "name": "Ana",
                "last_name": "Lima",
                "email": "ana@x.com",
                "address": "Rua A, 1",
            })
        );
    }
}
