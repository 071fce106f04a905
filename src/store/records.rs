//! # Records Facade
//!
//! Request handling never sees a store error: a failed load yields the
//! empty collection and a failed save is only logged. Read-modify-write
//! cycles on one collection are serialized inside this process; separate
//! processes sharing the files still race, last writer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing::error;

use super::backend::{Collection, RecordStore};
use crate::observability::Event;

/// Outcome of a closure passed to [`Records::modify`]
#[derive(Debug)]
pub enum Change<R> {
    /// The collection was mutated and must be written back
    Write(R),
    /// Nothing changed, skip the write
    Keep(R),
}

/// Error-masking access to a [`RecordStore`]
#[derive(Debug, Clone)]
pub struct Records {
    store: Arc<dyn RecordStore>,
    locks: Arc<HashMap<Collection, Mutex<()>>>,
}

impl Records {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let locks: HashMap<Collection, Mutex<()>> = Collection::ALL
            .into_iter()
            .map(|collection| (collection, Mutex::new(())))
            .collect();

        Self {
            store,
            locks: Arc::new(locks),
        }
    }

    /// Load a collection, falling back to an empty one on failure
    pub fn load(&self, collection: Collection) -> Vec<Value> {
        match self.store.load(collection) {
            Ok(records) => records,
            Err(e) => {
                error!(
                    event = Event::StoreReadFailed.as_str(),
                    collection = collection.as_str(),
                    location = %self.store.describe(collection),
                    error = %e,
                    "error reading collection, using empty default"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite a collection. Failures are logged and otherwise dropped.
    pub fn save(&self, collection: Collection, records: &[Value]) {
        if let Err(e) = self.store.save(collection, records) {
            error!(
                event = Event::StoreWriteFailed.as_str(),
                collection = collection.as_str(),
                location = %self.store.describe(collection),
                error = %e,
                "error writing collection"
            );
        }
    }

    /// Load, mutate and write back a collection under its lock
    pub fn modify<R>(
        &self,
        collection: Collection,
        f: impl FnOnce(&mut Vec<Value>) -> Change<R>,
    ) -> R {
        // The mutex guards no data, a poisoned lock is still usable
        let _guard = self.locks[&collection]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = self.load(collection);
        match f(&mut records) {
            Change::Write(result) => {
                self.save(collection, &records);
                result
            }
            Change::Keep(result) => result,
        }
    }

    /// Append one record to a collection
    pub fn append(&self, collection: Collection, record: Value) {
        self.modify(collection, |records| {
            records.push(record);
            Change::Write(())
        })
    }
}
