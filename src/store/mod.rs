pub mod memory;
pub mod mongo;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value as JsonValue;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A schema-less document exactly as a client submitted it
pub type Document = serde_json::Map<String, JsonValue>;

/// Field holding a document's identifier
pub const ID_FIELD: &str = "_id";

/// The three collections served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Workers,
    Projects,
    Equipment,
}

impl Collection {
    /// Name of the backing database collection
    pub fn name(self) -> &'static str {
        match self {
            Collection::Workers => "employees",
            Collection::Projects => "projects",
            Collection::Equipment => "equipment",
        }
    }
}

/// Database-assigned document identifier (12-byte ObjectId)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    pub fn generate() -> Self {
        DocumentId(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        DocumentId(oid)
    }
}

/// Error returned when a path segment is not a well-formed identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifier(pub String);

impl fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid identifier, it must be a 24-character hex string",
            self.0
        )
    }
}

impl std::error::Error for InvalidIdentifier {}

impl FromStr for DocumentId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(DocumentId)
            .map_err(|_| InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Identifier of a stored document
///
/// MongoDB keeps an `_id` supplied in the inserted body as-is, so not every
/// stored document carries a generated ObjectId.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredId {
    Generated(DocumentId),
    Supplied(JsonValue),
}

impl StoredId {
    /// Wire form of the identifier, always a string
    pub fn to_wire(&self) -> String {
        match self {
            StoredId::Generated(id) => id.to_string(),
            StoredId::Supplied(JsonValue::String(s)) => s.clone(),
            StoredId::Supplied(other) => other.to_string(),
        }
    }

    /// Whether the insert reported a usable identifier
    ///
    /// Null, `false`, zero and empty values do not count.
    pub fn is_reported(&self) -> bool {
        match self {
            StoredId::Generated(_) => true,
            StoredId::Supplied(JsonValue::Null) => false,
            StoredId::Supplied(JsonValue::Bool(b)) => *b,
            StoredId::Supplied(JsonValue::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            StoredId::Supplied(JsonValue::String(s)) => !s.is_empty(),
            StoredId::Supplied(JsonValue::Array(items)) => !items.is_empty(),
            StoredId::Supplied(JsonValue::Object(map)) => !map.is_empty(),
        }
    }
}

/// A document read back from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: StoredId,
    pub fields: Document,
}

impl StoredDocument {
    /// Render the document for a response body with `_id` stringified
    pub fn into_wire(self) -> JsonValue {
        let mut out = Document::with_capacity(self.fields.len() + 1);
        out.insert(ID_FIELD.to_string(), JsonValue::String(self.id.to_wire()));
        out.extend(self.fields.into_iter().filter(|(key, _)| key != ID_FIELD));
        JsonValue::Object(out)
    }
}

/// Data-access component shared by all handlers
///
/// Each method maps to exactly one database call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read every document in the collection
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>>;

    /// Insert a document verbatim, returning the `_id` the database stored
    ///
    /// That is a generated ObjectId unless the body carried its own `_id`.
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<StoredId>;

    /// Delete the document with the given identifier, returning the number deleted
    async fn delete_one(&self, collection: Collection, id: &DocumentId) -> Result<u64>;

    /// Verify that the database is reachable
    async fn ping(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_parse() {
        let id: DocumentId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_document_id_rejects_malformed() {
        let malformed = [
            "not-a-valid-id",
            "",
            "65a1f0c2e4b0a1b2c3d4e5f",
            "zza1f0c2e4b0a1b2c3d4e5f6",
        ];
        for bad in malformed {
            let err = bad.parse::<DocumentId>().unwrap_err();
            assert_eq!(err, InvalidIdentifier(bad.to_string()));
        }
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = "nope".parse::<DocumentId>().unwrap_err();
        assert!(err.to_string().contains("'nope' is not a valid identifier"));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(DocumentId::generate(), DocumentId::generate());
    }

    #[test]
    fn test_into_wire_puts_id_first() {
        let id = DocumentId::generate();
        let fields = json!({"name": "Alice", "role": "welder"})
            .as_object()
            .cloned()
            .unwrap();
        let wire = StoredDocument {
            id: StoredId::Generated(id),
            fields,
        }
        .into_wire();

        let keys: Vec<&String> = wire.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["_id", "name", "role"]);
        assert_eq!(wire["_id"], json!(id.to_string()));
    }

    #[test]
    fn test_reported_ids() {
        assert!(StoredId::Generated(DocumentId::generate()).is_reported());
        assert!(StoredId::Supplied(json!("w-1")).is_reported());
        assert!(StoredId::Supplied(json!(7)).is_reported());
        assert!(StoredId::Supplied(json!({"k": 1})).is_reported());

        let falsy_ids = [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ];
        for falsy in falsy_ids {
            assert!(!StoredId::Supplied(falsy).is_reported());
        }
    }

    #[test]
    fn test_supplied_id_is_stringified() {
        assert_eq!(StoredId::Supplied(json!("custom")).to_wire(), "custom");
        assert_eq!(StoredId::Supplied(json!(42)).to_wire(), "42");
    }
}
