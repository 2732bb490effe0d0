//! Document shape exchanged with the document store.
//!
//! A stored document is a flat map of field name to value. Values are either
//! native timestamps or plain JSON; when serialized for storage a timestamp is
//! written as `{"$date": "<rfc3339>"}` so that it can be told apart from a
//! plain string that happens to look like a date.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::deadline::format_timestamp;

pub mod fields {
    pub const TITLE: &str = "title";
    pub const COMPANY_NAME: &str = "companyName";
    pub const LOCATION: &str = "location";
    pub const JOB_TYPE: &str = "jobType";
    pub const SALARY_RANGE: &str = "salaryRange";
    pub const DESCRIPTION: &str = "description";
    pub const APPLICATION_DEADLINE: &str = "applicationDeadline";
    pub const STATUS: &str = "status";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
}

const DATE_TAG: &str = "$date";

/// Identifier assigned by the store. Rendered as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier, returning `None` when `raw` is not in the store's format.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    Timestamp(DateTime<Utc>),
    Plain(Value),
}

impl DocumentValue {
    pub fn to_json(&self) -> Value {
        match self {
            DocumentValue::Timestamp(ts) => {
                let mut tagged = Map::with_capacity(1);
                tagged.insert(DATE_TAG.to_string(), Value::String(format_timestamp(ts)));
                Value::Object(tagged)
            }
            DocumentValue::Plain(v) => v.clone(),
        }
    }

    pub fn from_json(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(raw)) = map.get(DATE_TAG) {
                    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
                        return DocumentValue::Timestamp(ts.with_timezone(&Utc));
                    }
                }
            }
        }
        DocumentValue::Plain(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentValue::Plain(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            DocumentValue::Timestamp(ts) => Some(ts),
            DocumentValue::Plain(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for DocumentValue {
    fn from(value: DateTime<Utc>) -> Self {
        DocumentValue::Timestamp(value)
    }
}

impl From<String> for DocumentValue {
    fn from(value: String) -> Self {
        DocumentValue::Plain(Value::String(value))
    }
}

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        DocumentValue::Plain(Value::String(value.to_string()))
    }
}

pub type Fields = BTreeMap<String, DocumentValue>;

/// A document as held by the store: its identifier plus its body fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub fields: Fields,
}

impl StoredDocument {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.fields.get(key)
    }

    /// Shallow merge: every field in `patch` replaces the stored one.
    pub fn apply(&mut self, patch: Fields) {
        self.fields.extend(patch);
    }

    /// Serialize the body (without the identifier) for storage.
    pub fn body_json(&self) -> Value {
        fields_to_json(&self.fields)
    }

    /// Rebuild a document from a stored body. A body that is not a JSON object
    /// yields a document with no fields.
    pub fn from_body_json(id: DocumentId, body: Value) -> Self {
        Self {
            id,
            fields: fields_from_json(body),
        }
    }
}

pub fn fields_to_json(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

pub fn fields_from_json(body: Value) -> Fields {
    match body {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, DocumentValue::from_json(v)))
            .collect(),
        _ => Fields::new(),
    }
}
