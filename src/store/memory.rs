//! # In-Memory Backend

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::backend::{Collection, RecordStore};
use super::errors::{StoreError, StoreResult};

/// In-memory record store for tests and embedding
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a collection already populated
    pub fn with_records(collection: Collection, records: Vec<Value>) -> Self {
        let mut collections = HashMap::new();
        collections.insert(collection, records);
        Self {
            collections: RwLock::new(collections),
        }
    }
}

impl RecordStore for InMemoryStore {
    fn load(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned(collection.to_string()))?;

        Ok(collections.entry(collection).or_default().clone())
    }

    fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned(collection.to_string()))?;

        collections.insert(collection, records.to_vec());
        Ok(())
    }

    fn describe(&self, collection: Collection) -> String {
        format!("memory:{}", collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_collection_loads_empty() {
        let store = InMemoryStore::new();
        assert!(store.load(Collection::LoginAttempts).unwrap().is_empty());
    }

    #[test]
    fn test_collections_are_independent() {
        let store = InMemoryStore::new();
        store
            .save(Collection::Users, &[json!({"id": 7})])
            .unwrap();

        assert_eq!(store.load(Collection::Users).unwrap().len(), 1);
        assert!(store.load(Collection::LoginAttempts).unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_collection() {
        let store = InMemoryStore::with_records(
            Collection::Users,
            vec![json!({"id": 1}), json!({"id": 2})],
        );
        store.save(Collection::Users, &[json!({"id": 3})]).unwrap();

        assert_eq!(store.load(Collection::Users).unwrap(), vec![json!({"id": 3})]);
    }
}
