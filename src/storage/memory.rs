//! In-process document store with optional JSON-file persistence.
//!
//! Collections are registered up front with their schemas. Documents are
//! kept in insertion order. With persistence enabled, a mutation is only
//! kept in memory once its collection file has been rewritten.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::document::{DocId, DocumentStore};
use super::errors::{StorageError, StorageResult};
use super::persist::Persistence;
use crate::schema::{IdKind, Schema, SchemaValidator};

#[derive(Debug)]
struct Collection {
    schema: Schema,
    documents: Vec<Value>,
}

impl Collection {
    fn position(&self, id: &DocId) -> Option<usize> {
        self.documents.iter().position(|doc| id.matches(doc))
    }

    fn generate_id(&self) -> StorageResult<Value> {
        match self.schema.id_kind {
            IdKind::Text => Ok(Value::String(Uuid::new_v4().simple().to_string())),
            IdKind::Int => {
                let max = self
                    .documents
                    .iter()
                    .filter_map(|doc| doc.get("_id").and_then(Value::as_i64))
                    .max()
                    .unwrap_or(0);
                max.checked_add(1)
                    .map(Value::from)
                    .ok_or_else(|| StorageError::IdSpaceExhausted {
                        collection: self.schema.collection.clone(),
                    })
            }
        }
    }

    fn check_id_kind(&self, id: &DocId) -> StorageResult<()> {
        match (self.schema.id_kind, id) {
            (IdKind::Text, DocId::Text(_)) | (IdKind::Int, DocId::Int(_)) => Ok(()),
            (kind, id) => Err(StorageError::InvalidId {
                collection: self.schema.collection.clone(),
                expected: kind.type_name(),
                id: id.to_string(),
            }),
        }
    }
}

/// Document store backed by memory, optionally mirrored to disk.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    persistence: Option<Persistence>,
}

impl MemoryStore {
    /// Memory-only store with the given collections
    pub fn new(schemas: impl IntoIterator<Item = Schema>) -> Self {
        let collections = schemas
            .into_iter()
            .map(|schema| {
                let name = schema.collection.clone();
                (
                    name,
                    Collection {
                        schema,
                        documents: Vec::new(),
                    },
                )
            })
            .collect();

        Self {
            collections: RwLock::new(collections),
            persistence: None,
        }
    }

    /// Store persisted under `data_dir`, loading any existing collections.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or a collection file is
    /// unreadable, undecodable, or holds documents that violate the schema.
    pub fn open(
        data_dir: impl Into<PathBuf>,
        schemas: impl IntoIterator<Item = Schema>,
    ) -> StorageResult<Self> {
        let persistence = Persistence::open(data_dir)?;
        let mut collections = HashMap::new();

        for schema in schemas {
            let documents = persistence.load(&schema.collection)?;
            verify_loaded(&persistence, &schema, &documents)?;
            debug!(
                collection = %schema.collection,
                documents = documents.len(),
                "collection loaded"
            );
            collections.insert(schema.collection.clone(), Collection { schema, documents });
        }

        Ok(Self {
            collections: RwLock::new(collections),
            persistence: Some(persistence),
        })
    }

    fn persist(&self, collection: &Collection) -> StorageResult<()> {
        match &self.persistence {
            Some(persistence) => {
                persistence.save(&collection.schema.collection, &collection.documents)
            }
            None => Ok(()),
        }
    }
}

fn verify_loaded(
    persistence: &Persistence,
    schema: &Schema,
    documents: &[Value],
) -> StorageResult<()> {
    let validator = SchemaValidator::new(schema);
    let mut seen = HashSet::new();
    let corrupt = |reason: String| StorageError::Corrupt {
        path: persistence.dir().join(format!("{}.json", schema.collection)),
        reason,
    };

    for doc in documents {
        validator
            .validate_document(doc)
            .map_err(|e| corrupt(e.to_string()))?;
        let id = doc
            .get("_id")
            .and_then(DocId::from_value)
            .ok_or_else(|| corrupt("document without usable _id".into()))?;
        if !seen.insert(id.clone()) {
            return Err(corrupt(format!("duplicate _id {}", id)));
        }
    }
    Ok(())
}

fn collection_mut<'a>(
    collections: &'a mut HashMap<String, Collection>,
    name: &str,
) -> StorageResult<&'a mut Collection> {
    collections
        .get_mut(name)
        .ok_or_else(|| StorageError::UnknownCollection(name.to_string()))
}

impl DocumentStore for MemoryStore {
    fn find_all(&self, collection: &str) -> StorageResult<Vec<Value>> {
        let collections = self.collections.read().map_err(|_| StorageError::Poisoned)?;
        let coll = collections
            .get(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))?;
        Ok(coll.documents.clone())
    }

    fn find_by_id(&self, collection: &str, id: &DocId) -> StorageResult<Option<Value>> {
        let collections = self.collections.read().map_err(|_| StorageError::Poisoned)?;
        let coll = collections
            .get(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))?;
        coll.check_id_kind(id)?;
        Ok(coll.position(id).map(|idx| coll.documents[idx].clone()))
    }

    fn insert(&self, collection: &str, document: Value) -> StorageResult<Value> {
        let mut collections = self.collections.write().map_err(|_| StorageError::Poisoned)?;
        let coll = collection_mut(&mut collections, collection)?;
        let validator = SchemaValidator::new(&coll.schema);

        let mut document = document;
        if let Some(obj) = document.as_object_mut() {
            if obj.get("_id").map_or(true, Value::is_null) {
                obj.insert("_id".to_string(), coll.generate_id()?);
            }
        }
        validator.validate_document(&document)?;

        let id = document
            .get("_id")
            .and_then(DocId::from_value)
            .ok_or_else(|| StorageError::InvalidId {
                collection: collection.to_string(),
                expected: coll.schema.id_kind.type_name(),
                id: document["_id"].to_string(),
            })?;
        if coll.position(&id).is_some() {
            return Err(StorageError::DuplicateKey {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        coll.documents.push(document.clone());
        if let Err(e) = self.persist(coll) {
            coll.documents.pop();
            return Err(e);
        }

        debug!(collection, id = %id, "document inserted");
        Ok(document)
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &DocId,
        patch: Map<String, Value>,
    ) -> StorageResult<Option<Value>> {
        let mut collections = self.collections.write().map_err(|_| StorageError::Poisoned)?;
        let coll = collection_mut(&mut collections, collection)?;
        coll.check_id_kind(id)?;

        let Some(idx) = coll.position(id) else {
            return Ok(None);
        };

        let validator = SchemaValidator::new(&coll.schema);
        validator.validate_patch(&patch)?;

        let mut updated = coll.documents[idx].clone();
        if let Some(obj) = updated.as_object_mut() {
            obj.extend(patch);
        }
        validator.validate_document(&updated)?;

        let previous = std::mem::replace(&mut coll.documents[idx], updated.clone());
        if let Err(e) = self.persist(coll) {
            coll.documents[idx] = previous;
            return Err(e);
        }

        debug!(collection, id = %id, "document updated");
        Ok(Some(updated))
    }

    fn delete_by_id(&self, collection: &str, id: &DocId) -> StorageResult<Option<Value>> {
        let mut collections = self.collections.write().map_err(|_| StorageError::Poisoned)?;
        let coll = collection_mut(&mut collections, collection)?;
        coll.check_id_kind(id)?;

        let Some(idx) = coll.position(id) else {
            return Ok(None);
        };

        let removed = coll.documents.remove(idx);
        if let Err(e) = self.persist(coll) {
            coll.documents.insert(idx, removed);
            return Err(e);
        }

        debug!(collection, id = %id, "document deleted");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, SchemaError};
    use serde_json::json;
    use tempfile::TempDir;

    fn studios() -> Schema {
        Schema::new("studios", "Studio", IdKind::Int)
            .field("name", FieldDef::required_string())
            .field("country", FieldDef::optional_string())
    }

    fn reels() -> Schema {
        Schema::new("reels", "Reel", IdKind::Text).field("title", FieldDef::required_string())
    }

    fn create_store() -> MemoryStore {
        MemoryStore::new([studios(), reels()])
    }

    #[test]
    fn test_insert_generates_int_ids() {
        let store = create_store();

        let first = store.insert("studios", json!({"name": "Fox"})).unwrap();
        let second = store.insert("studios", json!({"name": "MGM"})).unwrap();

        assert_eq!(first["_id"], 1);
        assert_eq!(second["_id"], 2);
    }

    #[test]
    fn test_insert_generates_text_ids() {
        let store = create_store();

        let doc = store.insert("reels", json!({"title": "Avatar"})).unwrap();

        let id = doc["_id"].as_str().unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_insert_keeps_caller_id() {
        let store = create_store();
        store.insert("studios", json!({"_id": 10, "name": "Fox"})).unwrap();

        let next = store.insert("studios", json!({"name": "MGM"})).unwrap();
        assert_eq!(next["_id"], 11);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let store = create_store();
        store.insert("studios", json!({"_id": 1, "name": "Fox"})).unwrap();

        let err = store
            .insert("studios", json!({"_id": 1, "name": "Other"}))
            .unwrap_err();

        assert!(matches!(err, StorageError::DuplicateKey { .. }));
        assert_eq!(store.find_all("studios").unwrap().len(), 1);
    }

    #[test]
    fn test_schema_violation_rejected() {
        let store = create_store();

        let err = store.insert("studios", json!({"country": "USA"})).unwrap_err();

        assert!(matches!(
            err,
            StorageError::Validation(SchemaError::MissingField { .. })
        ));
        assert!(store.find_all("studios").unwrap().is_empty());
    }

    #[test]
    fn test_find_all_preserves_insertion_order() {
        let store = create_store();
        for name in ["C", "A", "B"] {
            store.insert("studios", json!({"name": name})).unwrap();
        }

        let names: Vec<_> = store
            .find_all("studios")
            .unwrap()
            .into_iter()
            .map(|doc| doc["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = create_store();
        store
            .insert("studios", json!({"_id": 1, "name": "Fox", "country": "USA"}))
            .unwrap();

        let patch = json!({"name": "20th Century Studios"});
        let updated = store
            .update_by_id("studios", &DocId::Int(1), patch.as_object().unwrap().clone())
            .unwrap()
            .unwrap();

        assert_eq!(updated["name"], "20th Century Studios");
        assert_eq!(updated["country"], "USA");
        assert_eq!(
            store.find_by_id("studios", &DocId::Int(1)).unwrap().unwrap(),
            updated
        );
    }

    #[test]
    fn test_update_missing_returns_none() {
        let store = create_store();
        let patch = json!({"name": "Nobody"});

        let result = store
            .update_by_id("studios", &DocId::Int(999), patch.as_object().unwrap().clone())
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_update_rejects_bad_type_without_mutation() {
        let store = create_store();
        store.insert("studios", json!({"_id": 1, "name": "Fox"})).unwrap();

        let patch = json!({"name": 42});
        let err = store
            .update_by_id("studios", &DocId::Int(1), patch.as_object().unwrap().clone())
            .unwrap_err();

        assert!(err.is_client_error());
        let stored = store.find_by_id("studios", &DocId::Int(1)).unwrap().unwrap();
        assert_eq!(stored["name"], "Fox");
    }

    #[test]
    fn test_delete_returns_removed_then_none() {
        let store = create_store();
        store.insert("studios", json!({"_id": 1, "name": "Fox"})).unwrap();

        let removed = store.delete_by_id("studios", &DocId::Int(1)).unwrap();
        assert_eq!(removed.unwrap()["name"], "Fox");

        assert!(store.delete_by_id("studios", &DocId::Int(1)).unwrap().is_none());
    }

    #[test]
    fn test_wrong_id_kind_is_invalid_id() {
        let store = create_store();

        let err = store
            .find_by_id("studios", &DocId::Text("abc".into()))
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidId { expected: "int", .. }));
    }

    #[test]
    fn test_unknown_collection() {
        let store = create_store();
        let err = store.find_all("actors").unwrap_err();
        assert!(matches!(err, StorageError::UnknownCollection(_)));
    }

    #[test]
    fn test_open_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        {
            let store = MemoryStore::open(tmp.path(), [studios()]).unwrap();
            store.insert("studios", json!({"name": "Fox"})).unwrap();
            store.insert("studios", json!({"name": "MGM"})).unwrap();
            store.delete_by_id("studios", &DocId::Int(1)).unwrap();
        }

        let reopened = MemoryStore::open(tmp.path(), [studios()]).unwrap();
        let docs = reopened.find_all("studios").unwrap();
        assert_eq!(docs, vec![json!({"_id": 2, "name": "MGM"})]);
    }

    #[test]
    fn test_open_rejects_invalid_persisted_documents() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("studios.json"),
            r#"[{"_id": 1, "name": "Fox"}, {"_id": 1, "name": "Copy"}]"#,
        )
        .unwrap();

        let err = MemoryStore::open(tmp.path(), [studios()]).err().unwrap();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_generated_id_never_overflows() {
        let store = create_store();
        store
            .insert("studios", json!({"_id": i64::MAX, "name": "Max"}))
            .unwrap();

        let err = store.insert("studios", json!({"name": "Next"})).unwrap_err();
        assert!(matches!(err, StorageError::IdSpaceExhausted { .. }));
        assert!(err.is_client_error());

        // lock still usable and nothing was added
        assert_eq!(store.find_all("studios").unwrap().len(), 1);
        store
            .insert("studios", json!({"_id": 1, "name": "Explicit"}))
            .unwrap();
    }

    fn block_writes(dir: &std::path::Path, collection: &str) {
        std::fs::create_dir(dir.join(format!("{}.json.tmp", collection))).unwrap();
    }

    #[test]
    fn test_failed_persist_rolls_back_every_mutation() {
        let tmp = TempDir::new().unwrap();
        let store = MemoryStore::open(tmp.path(), [studios()]).unwrap();
        let original = store.insert("studios", json!({"name": "Fox"})).unwrap();
        block_writes(tmp.path(), "studios");

        let err = store.insert("studios", json!({"name": "MGM"})).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!err.is_client_error());

        let patch = json!({"country": "USA"});
        store
            .update_by_id("studios", &DocId::Int(1), patch.as_object().unwrap().clone())
            .unwrap_err();

        store.delete_by_id("studios", &DocId::Int(1)).unwrap_err();

        assert_eq!(store.find_all("studios").unwrap(), vec![original]);
    }
}
