//! # User Service
//!
//! Linear scans over the users collection. `id` uniqueness holds because
//! every save replaces a matching record instead of appending.

use serde_json::Value;
use tracing::{info, warn};

use super::errors::{UserError, UserResult};
use super::model::{same_id, SaveUserRequest, UserUpdate};
use crate::observability::Event;
use crate::store::{Change, Collection, Records};

/// Parse the `:id` path segment from its leading integer, so `"12abc"` is
/// 12 and `"7.5"` is 7. A segment with no leading digits matches no user.
pub fn parse_user_id(raw: &str) -> UserResult<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(UserError::NotFound);
    }

    format!("{}{}", sign, &digits[..end])
        .parse()
        .map_err(|_| UserError::NotFound)
}

fn find_mut(users: &mut [Value], id: i64) -> Option<&mut Value> {
    let wanted = Value::from(id);
    users
        .iter_mut()
        .find(|record| same_id(record.get("id"), Some(&wanted)))
}

/// Save and update operations on the users collection
#[derive(Debug, Clone)]
pub struct UserService {
    records: Records,
}

impl UserService {
    pub fn new(records: Records) -> Self {
        Self { records }
    }

    /// Insert the user, or replace the record with the same id in place
    pub fn save(&self, request: SaveUserRequest) {
        let id = request.id.clone();
        let value = request.to_record();

        let replaced = self.records.modify(Collection::Users, |users| {
            match users
                .iter_mut()
                .find(|record| same_id(record.get("id"), id.as_ref()))
            {
                Some(existing) => {
                    *existing = value;
                    Change::Write(true)
                }
                None => {
                    users.push(value);
                    Change::Write(false)
                }
            }
        });

        info!(event = Event::UserSaved.as_str(), id = ?id, replaced, "user saved");
    }

    /// Fail with `NotFound` unless a user with `id` is stored
    pub fn ensure_exists(&self, id: i64) -> UserResult<()> {
        let mut users = self.records.load(Collection::Users);
        if find_mut(&mut users, id).is_some() {
            return Ok(());
        }
        warn!(event = Event::UserNotFound.as_str(), id, "user not found");
        Err(UserError::NotFound)
    }

    /// Apply `update` to the user with `id` and return the updated record.
    ///
    /// An unknown id leaves the collection untouched.
    pub fn update(&self, id: i64, update: UserUpdate) -> UserResult<Value> {
        let field = update.field();

        let result = self.records.modify(Collection::Users, move |users| {
            match find_mut(users, id).and_then(Value::as_object_mut) {
                Some(record) => {
                    update.apply(record);
                    Change::Write(Ok(Value::Object(record.clone())))
                }
                None => Change::Keep(Err(UserError::NotFound)),
            }
        });

        match &result {
            Ok(_) => info!(event = Event::UserUpdated.as_str(), id, field, "user updated"),
            Err(_) => warn!(event = Event::UserNotFound.as_str(), id, "user not found"),
        }
        result
    }

    /// Every stored user record, as stored
    pub fn list(&self) -> Vec<Value> {
        self.records.load(Collection::Users)
    }
}
