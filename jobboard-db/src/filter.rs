//! Equality filters and ordering over stored documents.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use jobboard_core::{DocumentValue, StoredDocument};
use serde_json::Value;

/// Conjunction of `field == value` clauses on string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    clauses: Vec<(String, String)>,
}

impl DocumentFilter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, doc: &StoredDocument) -> bool {
        self.clauses
            .iter()
            .all(|(field, wanted)| doc.get(field).and_then(DocumentValue::as_str) == Some(wanted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<(String, SortOrder)>,
}

impl FindOptions {
    pub fn sorted_by(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort: Some((field.into(), order)),
        }
    }
}

/// Ordering key for one field. Variant order matters: values that are not
/// timestamps sort before every timestamp.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Time(DateTime<Utc>),
}

/// Native timestamps and RFC 3339 strings compare as instants; documents
/// missing the field sort before any that have it.
fn sort_key(doc: &StoredDocument, field: &str) -> Option<SortKey> {
    doc.get(field).map(|value| match value {
        DocumentValue::Timestamp(ts) => SortKey::Time(*ts),
        DocumentValue::Plain(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|ts| SortKey::Time(ts.with_timezone(&Utc)))
            .unwrap_or_else(|_| SortKey::Text(s.clone())),
        DocumentValue::Plain(other) => SortKey::Text(other.to_string()),
    })
}

/// Stable sort, so documents with equal keys keep their insertion order.
pub fn sort_documents(docs: &mut [StoredDocument], field: &str, order: SortOrder) {
    docs.sort_by(|a, b| {
        let ord: Ordering = sort_key(a, field).cmp(&sort_key(b, field));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}
