//! # User Model

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use super::errors::{UserError, UserResult};

/// `/save-user` request body
///
/// Each field is kept exactly as submitted, whatever its JSON type. A
/// field missing from the body is left out of the stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveUserRequest {
    pub id: Option<Value>,
    pub username: Option<Value>,
    pub amount: Option<Value>,
}

impl SaveUserRequest {
    /// Read the three fields from a request body. Never fails: a body that
    /// is not an object yields an empty request.
    pub fn from_body(body: &Value) -> Self {
        Self {
            id: body.get("id").cloned(),
            username: body.get("username").cloned(),
            amount: body.get("amount").cloned(),
        }
    }

    /// The record stored for this request
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        let fields = [("id", &self.id), ("username", &self.username), ("amount", &self.amount)];
        for (key, value) in fields {
            if let Some(value) = value {
                record.insert(key.to_string(), value.clone());
            }
        }
        Value::Object(record)
    }
}

/// Strict equality between a stored id and a requested one.
///
/// Numbers compare by value, so `7` and `7.0` are the same id. Everything
/// else compares structurally. An absent id only matches another absent id.
pub fn same_id(stored: Option<&Value>, wanted: Option<&Value>) -> bool {
    match (stored, wanted) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

/// A permitted change to a stored user
///
/// Read from `{"field": ..., "newValue": ...}`. `id` is not updatable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "newValue", rename_all = "camelCase")]
pub enum UserUpdate {
    Username(String),
    Amount(Number),
}

impl UserUpdate {
    /// Decode an `/update-user` request body
    pub fn from_body(body: Value) -> UserResult<Self> {
        serde_json::from_value(body).map_err(|e| UserError::UnsupportedUpdate(e.to_string()))
    }

    /// Name of the field this update writes
    pub fn field(&self) -> &'static str {
        match self {
            UserUpdate::Username(_) => "username",
            UserUpdate::Amount(_) => "amount",
        }
    }

    /// Write the new value into a stored record, leaving other keys alone
    pub fn apply(self, record: &mut Map<String, Value>) {
        let field = self.field();
        let value = match self {
            UserUpdate::Username(username) => Value::String(username),
            UserUpdate::Amount(amount) => Value::Number(amount),
        };
        record.insert(field.to_string(), value);
    }
}
