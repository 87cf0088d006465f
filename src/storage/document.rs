//! Document identifiers and the store interface consumed by the HTTP layer.

use std::fmt;

use serde_json::{Map, Value};

use super::errors::StorageResult;

/// Primary key of a stored document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocId {
    Text(String),
    Int(i64),
}

impl DocId {
    /// JSON form, as stored under `_id`
    pub fn to_value(&self) -> Value {
        match self {
            DocId::Text(s) => Value::String(s.clone()),
            DocId::Int(n) => Value::from(*n),
        }
    }

    /// Reads a key back out of a stored `_id`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(DocId::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(DocId::Int),
            _ => None,
        }
    }

    /// True if `document` carries this key as its `_id`
    pub fn matches(&self, document: &Value) -> bool {
        match (self, document.get("_id")) {
            (DocId::Text(id), Some(Value::String(other))) => id == other,
            (DocId::Int(id), Some(Value::Number(other))) => other.as_i64() == Some(*id),
            _ => false,
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Text(s) => write!(f, "{}", s),
            DocId::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId::Text(s.to_string())
    }
}

impl From<i64> for DocId {
    fn from(n: i64) -> Self {
        DocId::Int(n)
    }
}

/// Per-collection CRUD primitives with schema enforcement.
///
/// Every call is atomic with respect to other calls on the same store.
pub trait DocumentStore: Send + Sync {
    /// All documents in storage-native order
    fn find_all(&self, collection: &str) -> StorageResult<Vec<Value>>;

    /// The document with this key, if any
    fn find_by_id(&self, collection: &str, id: &DocId) -> StorageResult<Option<Value>>;

    /// Validates and stores a new document, generating `_id` when absent.
    /// Returns the document as persisted.
    fn insert(&self, collection: &str, document: Value) -> StorageResult<Value>;

    /// Merges `patch` into the document with this key and returns the
    /// post-update document, or `None` if no document matched.
    fn update_by_id(
        &self,
        collection: &str,
        id: &DocId,
        patch: Map<String, Value>,
    ) -> StorageResult<Option<Value>>;

    /// Removes the document with this key, returning it if it existed
    fn delete_by_id(&self, collection: &str, id: &DocId) -> StorageResult<Option<Value>>;
}
