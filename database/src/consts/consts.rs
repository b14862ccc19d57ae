use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
/// Store assigned identifier, always exposed to clients as a 24 character hex string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub ObjectId);

#[derive(Error, Debug, PartialEq)]
pub enum EntityIdError {
    #[error("Malformed id, expected 24 hex characters: {0}")]
    Malformed(String),
}

impl EntityId {
    pub fn new() -> EntityId {
        EntityId(ObjectId::new())
    }

    /// Parses the public string form of an id, never panics on bad input
    pub fn parse(value: &str) -> Result<EntityId, EntityIdError> {
        ObjectId::parse_str(value)
            .map(EntityId)
            .map_err(|_| EntityIdError::Malformed(value.to_string()))
    }

    pub fn to_object_id(self) -> ObjectId {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for EntityId {
    fn from(value: ObjectId) -> Self {
        EntityId(value)
    }
}

// Serialized as a plain string so the `$oid` extended json form never reaches clients
impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;

        EntityId::parse(&value).map_err(de::Error::custom)
    }
}

// Values
/// Upper bound on the number of records returned by a single list
pub const MAX_LIST_SIZE: i64 = 1000;
pub const DATABASE_NAME: &str = "data";
pub const COLLECTION_NAME: &str = "person";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_accepts_24_hex_characters() {
        let id = EntityId::parse("65a1f0c2b3d4e5f601234567").expect("should parse");

        assert_eq!(id.to_string(), "65a1f0c2b3d4e5f601234567");
    }

    #[rstest]
    #[case("")]
    #[case("not-an-id")]
    #[case("65a1f0c2b3d4e5f60123456")]
    #[case("65a1f0c2b3d4e5f6012345678")]
    #[case("zza1f0c2b3d4e5f601234567")]
    fn parse_rejects_malformed_ids(#[case] value: &str) {
        assert_eq!(
            EntityId::parse(value),
            Err(EntityIdError::Malformed(value.to_string()))
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntityId::parse("65a1f0c2b3d4e5f601234567").unwrap();

        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::json!("65a1f0c2b3d4e5f601234567")
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }
}
