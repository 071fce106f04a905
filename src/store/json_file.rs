//! # JSON File Backend
//!
//! One pretty-printed JSON array per collection, stored under a root
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use super::backend::{Collection, RecordStore};
use super::errors::{StoreError, StoreResult};
use crate::observability::Event;

/// Default file name of the login attempts collection
pub const DEFAULT_LOGIN_ATTEMPTS_FILE: &str = "loginAttempts.json";

/// Default file name of the users collection
pub const DEFAULT_USERS_FILE: &str = "users.json";

/// JSON file storage backend
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    login_attempts_file: String,
    users_file: String,
}

impl JsonFileStore {
    /// Create a backend rooted at `root` with the default file names
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            login_attempts_file: DEFAULT_LOGIN_ATTEMPTS_FILE.to_string(),
            users_file: DEFAULT_USERS_FILE.to_string(),
        }
    }

    /// Override the file names of both collections
    pub fn with_file_names(
        mut self,
        login_attempts_file: impl Into<String>,
        users_file: impl Into<String>,
    ) -> Self {
        self.login_attempts_file = login_attempts_file.into();
        self.users_file = users_file.into();
        self
    }

    /// Full path of a collection file
    pub fn path_of(&self, collection: Collection) -> PathBuf {
        let name = match collection {
            Collection::LoginAttempts => &self.login_attempts_file,
            Collection::Users => &self.users_file,
        };
        self.root.join(name)
    }

    /// Create the collection file holding an empty array if it is missing.
    ///
    /// Returns true when the file was created.
    pub fn ensure_exists(&self, collection: Collection) -> StoreResult<bool> {
        let path = self.path_of(collection);
        if path.exists() {
            return Ok(false);
        }

        write_atomically(&path, &[])?;
        info!(
            event = Event::CollectionCreated.as_str(),
            collection = collection.as_str(),
            path = %path.display(),
            "created empty collection"
        );
        Ok(true)
    }
}

fn to_pretty_json(path: &Path, records: &[Value]) -> StoreResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| StoreError::serialization(path.display().to_string(), e))
}

/// Write through a sibling temp file and rename it over the target
fn write_atomically(path: &Path, records: &[Value]) -> StoreResult<()> {
    let display = path.display().to_string();
    let text = to_pretty_json(path, records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(&display, e))?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, text).map_err(|e| StoreError::io(tmp_path.display().to_string(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(&display, e))
}

impl RecordStore for JsonFileStore {
    fn load(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.ensure_exists(collection)?;

        let path = self.path_of(collection);
        let display = path.display().to_string();

        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&display, e))?;

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => Err(StoreError::NotAnArray(display)),
            Err(e) => Err(StoreError::serialization(display, e)),
        }
    }

    fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()> {
        write_atomically(&self.path_of(collection), records)
    }

    fn describe(&self, collection: Collection) -> String {
        self.path_of(collection).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path());

        let records = store.load(Collection::Users).unwrap();
        assert!(records.is_empty());

        let on_disk = fs::read_to_string(temp.path().join("users.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[test]
    fn test_load_creates_nested_data_dir() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("a/b"));

        store.load(Collection::LoginAttempts).unwrap();
        assert!(temp.path().join("a/b/loginAttempts.json").exists());
    }

    #[test]
    fn test_save_uses_two_space_indentation() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path());

        store
            .save(Collection::Users, &[json!({"id": 1, "username": "ana"})])
            .unwrap();

        let on_disk = fs::read_to_string(store.path_of(Collection::Users)).unwrap();
        assert_eq!(
            on_disk,
            "[\n  {\n    \"id\": 1,\n    \"username\": \"ana\"\n  }\n]"
        );
        assert!(!temp.path().join("users.json.tmp").exists());
    }

    #[test]
    fn test_save_then_load_from_new_instance() {
        let temp = TempDir::new().unwrap();
        let records = vec![json!({"id": 1}), json!({"id": 2, "amount": 2.5})];

        JsonFileStore::new(temp.path())
            .save(Collection::Users, &records)
            .unwrap();

        let reopened = JsonFileStore::new(temp.path());
        assert_eq!(reopened.load(Collection::Users).unwrap(), records);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path());
        fs::write(store.path_of(Collection::Users), "{ not json").unwrap();

        let result = store.load(Collection::Users);
        assert!(matches!(result, Err(StoreError::Serialization { .. })));
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path());
        fs::write(store.path_of(Collection::Users), "{\"id\": 1}").unwrap();

        let result = store.load(Collection::Users);
        assert!(matches!(result, Err(StoreError::NotAnArray(_))));
    }

    #[test]
    fn test_custom_file_names() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path()).with_file_names("attempts.json", "people.json");

        assert!(store.ensure_exists(Collection::LoginAttempts).unwrap());
        assert!(!store.ensure_exists(Collection::LoginAttempts).unwrap());
        assert!(temp.path().join("attempts.json").exists());
        assert_eq!(
            store.path_of(Collection::Users),
            temp.path().join("people.json")
        );
    }
}
