//! # Record Store
//!
//! Persistence for the service's two collections.
//!
//! A collection is a JSON array of records addressed by a [`Collection`]
//! key. Backends implement [`RecordStore`]; request handling goes through
//! the [`Records`] facade, which masks backend failures and serializes
//! read-modify-write cycles per collection.

pub mod backend;
pub mod errors;
pub mod json_file;
pub mod memory;
pub mod records;

pub use backend::{Collection, RecordStore};
pub use errors::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use records::{Change, Records};
