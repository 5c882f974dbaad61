use std::collections::HashSet;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const MANUFACTURER: &str = "manufacturer";
pub const MODEL: &str = "model";
pub const SAMPLE_SIZE: &str = "sample_size";

// ---------------------------------------------------------------------------
// FieldValue – a single cell of a device record
// ---------------------------------------------------------------------------

/// A dynamically-typed scalar, mirroring the JSON scalar types of the source.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&JsonValue> for FieldValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => FieldValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Null => FieldValue::Null,
            // Nested structures are not expected in sensor records; keep their text.
            other => FieldValue::String(other.to_string()),
        }
    }
}

impl FieldValue {
    /// Numeric view of the value; booleans and strings are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// Record – one device
// ---------------------------------------------------------------------------

/// One device row. Fields keep the order they had in the source object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        Record { fields }
    }

    /// Build a record from a JSON object, preserving key order.
    pub fn from_json_object(obj: &serde_json::Map<String, JsonValue>) -> Self {
        Record {
            fields: obj
                .iter()
                .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// String value of `name`; null, missing and non-string values give `None`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.get_str(MANUFACTURER)
    }

    pub fn model(&self) -> Option<&str> {
        self.get_str(MODEL)
    }

    pub fn sample_size(&self) -> Option<f64> {
        self.get_f64(SAMPLE_SIZE)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }
}

// ---------------------------------------------------------------------------
// Dataset – the ordered collection of records
// ---------------------------------------------------------------------------

/// Ordered records plus the union of their column names.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Column names in first-appearance order across all records.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut column_names = Vec::new();
        for rec in &records {
            for name in rec.field_names() {
                if seen.insert(name) {
                    column_names.push(name.to_string());
                }
            }
        }
        Dataset {
            records,
            column_names,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
