use serde_json::Value;

use crate::deadline::format_timestamp;
use crate::document::{fields, DocumentValue, StoredDocument};
use crate::listing::Listing;

/// Convert a stored document into its wire record.
///
/// The store identifier becomes `id`. Native timestamps are rendered as
/// ISO-8601; plain values pass through as-is (strings verbatim, other scalars
/// as JSON text). Missing text fields become empty strings. Never fails.
pub fn normalize(doc: StoredDocument) -> Listing {
    let StoredDocument { id, mut fields } = doc;
    let mut take = |key: &str| fields.remove(key).map(render);

    Listing {
        id: id.to_string(),
        title: take(fields::TITLE).unwrap_or_default(),
        company_name: take(fields::COMPANY_NAME).unwrap_or_default(),
        location: take(fields::LOCATION).unwrap_or_default(),
        job_type: take(fields::JOB_TYPE).unwrap_or_default(),
        salary_range: take(fields::SALARY_RANGE).unwrap_or_default(),
        description: take(fields::DESCRIPTION).unwrap_or_default(),
        application_deadline: take(fields::APPLICATION_DEADLINE).unwrap_or_default(),
        status: take(fields::STATUS).unwrap_or_default(),
        created_at: take(fields::CREATED_AT).unwrap_or_default(),
        updated_at: take(fields::UPDATED_AT),
    }
}

fn render(value: DocumentValue) -> String {
    match value {
        DocumentValue::Timestamp(ts) => format_timestamp(&ts),
        DocumentValue::Plain(Value::String(s)) => s,
        DocumentValue::Plain(Value::Null) => String::new(),
        DocumentValue::Plain(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentId, Fields};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn doc(fields: Fields) -> StoredDocument {
        StoredDocument::new(DocumentId::new(), fields)
    }

    #[test]
    fn maps_identifier_and_converts_native_timestamps() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut f = Fields::new();
        f.insert(fields::TITLE.into(), "Full Stack Developer".into());
        f.insert(fields::CREATED_AT.into(), created.into());
        f.insert(fields::APPLICATION_DEADLINE.into(), created.into());
        let d = doc(f);
        let id = d.id.to_string();

        let listing = normalize(d);
        assert_eq!(listing.id, id);
        assert_eq!(listing.title, "Full Stack Developer");
        assert_eq!(listing.created_at, "2024-01-02T03:04:05.000Z");
        assert_eq!(listing.application_deadline, "2024-01-02T03:04:05.000Z");
        assert_eq!(listing.updated_at, None);
    }

    #[test]
    fn passes_plain_values_through_unchanged() {
        let mut f = Fields::new();
        f.insert(fields::CREATED_AT.into(), "yesterday-ish".into());
        f.insert(fields::UPDATED_AT.into(), DocumentValue::Plain(json!(1700000000)));
        let listing = normalize(doc(f));
        assert_eq!(listing.created_at, "yesterday-ish");
        assert_eq!(listing.updated_at.as_deref(), Some("1700000000"));
    }

    #[test]
    fn empty_document_is_still_a_listing() {
        let listing = normalize(doc(Fields::new()));
        assert!(!listing.id.is_empty());
        assert_eq!(listing.title, "");
        let wire = serde_json::to_value(&listing).unwrap();
        assert!(wire.get("_id").is_none());
    }
}
