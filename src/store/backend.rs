//! # Record Store Backend Trait

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::errors::StoreResult;

/// Key of a persisted collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Append-only log of login and OTP verification attempts
    LoginAttempts,
    /// Mutable user records keyed by `id`
    Users,
}

impl Collection {
    /// All known collections
    pub const ALL: [Collection; 2] = [Collection::LoginAttempts, Collection::Users];

    /// Stable name used on the command line and in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::LoginAttempts => "login-attempts",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login-attempts" => Ok(Collection::LoginAttempts),
            "users" => Ok(Collection::Users),
            other => Err(format!(
                "unknown collection '{}', expected 'login-attempts' or 'users'",
                other
            )),
        }
    }
}

/// Backend trait for collection persistence
///
/// `load` on a collection that was never written creates it empty.
/// `save` replaces the whole collection.
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Load every record of a collection
    fn load(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    /// Overwrite a collection with `records`
    fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()>;

    /// Human readable location of a collection, for log lines
    fn describe(&self, collection: Collection) -> String {
        collection.as_str().to_string()
    }
}
