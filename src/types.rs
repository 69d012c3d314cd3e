//! Common types used throughout the Kintone SDK
//!
//! Records, field values, identifiers and the response shapes returned by
//! the REST endpoints.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Field code of the internal record id
pub const RECORD_ID_FIELD: &str = "$id";

// ============================================================================
// App ID
// ============================================================================

/// Numeric identifier of a Kintone app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(u64);

impl AppId {
    /// Create an app id from a number; zero is rejected
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(Error::invalid_app_id("0"));
        }
        Ok(Self(id))
    }

    /// Parse an app id from user input
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| Error::invalid_app_id(value))
    }

    /// Get the numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for AppId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// Value wrapper of a single record field (`{"type": ..., "value": ...}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Field type as reported by the server (absent on outgoing records)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Raw field value
    pub value: JsonValue,
}

impl FieldValue {
    /// Wrap a value for sending
    pub fn new(value: impl Into<JsonValue>) -> Self {
        Self {
            field_type: None,
            value: value.into(),
        }
    }
}

/// A Kintone record: field code to value wrapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(code, value);
        self
    }

    /// Insert or replace a field value
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(code.into(), FieldValue::new(value));
    }

    /// Get a field wrapper by code
    pub fn get(&self, code: &str) -> Option<&FieldValue> {
        self.0.get(code)
    }

    /// Get a field's raw value by code
    pub fn value(&self, code: &str) -> Option<&JsonValue> {
        self.0.get(code).map(|f| &f.value)
    }

    /// Internal record id (`$id`), if present and numeric
    pub fn record_id(&self) -> Option<u64> {
        match self.value(RECORD_ID_FIELD)? {
            JsonValue::String(s) => s.parse().ok(),
            JsonValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in code order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Update targets
// ============================================================================

/// Alternate unique field identifying a record for update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateKey {
    /// Field code of the unique field
    pub field: String,
    /// Value to match
    pub value: JsonValue,
}

impl UpdateKey {
    /// Create an update key
    pub fn new(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// How a record to update is identified
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateTarget {
    /// Internal record id
    Id(u64),
    /// Declared update-key field
    Key(UpdateKey),
}

/// One entry of a bulk update
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    /// Record to update
    pub target: UpdateTarget,
    /// Fields to replace
    pub record: Record,
    /// Expected revision, if optimistic locking is wanted
    pub revision: Option<u64>,
}

impl RecordUpdate {
    /// Update by record id
    pub fn by_id(id: u64, record: Record) -> Self {
        Self {
            target: UpdateTarget::Id(id),
            record,
            revision: None,
        }
    }

    /// Update by update key
    pub fn by_key(key: UpdateKey, record: Record) -> Self {
        Self {
            target: UpdateTarget::Key(key),
            record,
            revision: None,
        }
    }

    /// Set the expected revision
    #[must_use]
    pub fn revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }
}

// ============================================================================
// Mutation results
// ============================================================================

/// Id and revision of a written record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRevision {
    /// Record id
    pub id: String,
    /// Revision after the write
    pub revision: String,
}

/// Result of a bulk create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecords {
    /// Ids of created records, in request order
    pub ids: Vec<String>,
    /// Revisions of created records, in request order
    pub revisions: Vec<String>,
}

// ============================================================================
// Query results
// ============================================================================

/// Records returned by a single `records.json` call
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordPage {
    /// Records on this page
    #[serde(default)]
    pub records: Vec<Record>,
    /// Total matching records, when requested
    #[serde(
        rename = "totalCount",
        default,
        deserialize_with = "deserialize_total_count"
    )]
    pub total_count: Option<u64>,
}

/// Records accumulated over one or more pages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordSet {
    /// Accumulated records
    pub records: Vec<Record>,
    /// Server-reported total, when requested
    #[serde(rename = "totalCount", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl RecordSet {
    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were fetched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Kintone reports `totalCount` as a string; accept numbers and null too
fn deserialize_total_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid totalCount: {n}"))),
        Some(JsonValue::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid totalCount: {s}"))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid totalCount: {other}"
        ))),
    }
}

// ============================================================================
// Field metadata
// ============================================================================

/// A field definition from form layout or field metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProperty {
    /// Field code
    #[serde(default)]
    pub code: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Field type (e.g. `SINGLE_LINE_TEXT`)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Remaining type-specific attributes
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("229", Some(229) ; "plain number")]
    #[test_case(" 12 ", Some(12) ; "surrounding whitespace")]
    #[test_case("0", None ; "zero")]
    #[test_case("", None ; "empty")]
    #[test_case("abc", None ; "letters")]
    #[test_case("-3", None ; "negative")]
    #[test_case("12a", None ; "trailing garbage")]
    fn test_app_id_parse(input: &str, expected: Option<u64>) {
        assert_eq!(AppId::parse(input).ok().map(AppId::get), expected);
    }

    #[test]
    fn test_app_id_new_rejects_zero() {
        assert!(matches!(AppId::new(0), Err(Error::InvalidAppId { .. })));
        assert_eq!(AppId::new(7).unwrap().to_string(), "7");
    }

    #[test]
    fn test_record_serializes_value_wrappers() {
        let record = Record::new()
            .with("name", "Alice")
            .with("age", 30);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "age": {"value": 30},
                "name": {"value": "Alice"}
            })
        );
    }

    #[test]
    fn test_record_deserialize_with_types() {
        let record: Record = serde_json::from_value(json!({
            "$id": {"type": "__ID__", "value": "42"},
            "title": {"type": "SINGLE_LINE_TEXT", "value": "Hello"}
        }))
        .unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.record_id(), Some(42));
        assert_eq!(
            record.get("title").unwrap().field_type.as_deref(),
            Some("SINGLE_LINE_TEXT")
        );
        assert_eq!(record.value("title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_record_id_missing_or_invalid() {
        assert_eq!(Record::new().record_id(), None);
        assert_eq!(Record::new().with("$id", "abc").record_id(), None);
        assert_eq!(Record::new().with("$id", 5).record_id(), Some(5));
    }

    #[test]
    fn test_record_page_total_count_variants() {
        let page: RecordPage =
            serde_json::from_value(json!({"records": [], "totalCount": "1234"})).unwrap();
        assert_eq!(page.total_count, Some(1234));

        let page: RecordPage =
            serde_json::from_value(json!({"records": [], "totalCount": 7})).unwrap();
        assert_eq!(page.total_count, Some(7));

        let page: RecordPage =
            serde_json::from_value(json!({"records": [], "totalCount": null})).unwrap();
        assert_eq!(page.total_count, None);

        let page: RecordPage = serde_json::from_value(json!({"records": []})).unwrap();
        assert_eq!(page.total_count, None);

        assert!(serde_json::from_value::<RecordPage>(json!({"totalCount": "many"})).is_err());
    }

    #[test]
    fn test_record_set_serialization_skips_missing_total() {
        let set = RecordSet::default();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!({"records": []}));

        let set = RecordSet {
            records: vec![],
            total_count: Some(3),
        };
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({"records": [], "totalCount": 3})
        );
    }

    #[test]
    fn test_field_property_keeps_extra_attributes() {
        let prop: FieldProperty = serde_json::from_value(json!({
            "type": "SINGLE_LINE_TEXT",
            "code": "title",
            "label": "Title",
            "required": true,
            "maxLength": "64"
        }))
        .unwrap();

        assert_eq!(prop.code, "title");
        assert_eq!(prop.label.as_deref(), Some("Title"));
        assert_eq!(prop.field_type, "SINGLE_LINE_TEXT");
        assert_eq!(prop.extra.get("required"), Some(&json!(true)));
    }

    #[test]
    fn test_record_update_builders() {
        let update = RecordUpdate::by_key(UpdateKey::new("email", "a@example.com"), Record::new())
            .revision(3);
        assert_eq!(update.revision, Some(3));
        assert!(matches!(update.target, UpdateTarget::Key(_)));

        let update = RecordUpdate::by_id(9, Record::new());
        assert_eq!(update.target, UpdateTarget::Id(9));
        assert_eq!(update.revision, None);
    }
}
