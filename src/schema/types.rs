//! Schema types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Kind of a scalar JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl ScalarKind {
    /// Kind of a scalar value, `None` for null, arrays and objects
    pub fn of(value: &Value) -> Option<ScalarKind> {
        match value {
            Value::Bool(_) => Some(ScalarKind::Boolean),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ScalarKind::Integer),
            Value::Number(_) => Some(ScalarKind::Number),
            Value::String(_) => Some(ScalarKind::String),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Merge two kinds, returning `None` when they cannot be reconciled
    pub fn merge_with(self, other: ScalarKind) -> Option<ScalarKind> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (ScalarKind::Integer, ScalarKind::Number) | (ScalarKind::Number, ScalarKind::Integer) => {
                Some(ScalarKind::Number)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Integer => write!(f, "integer"),
            ScalarKind::Number => write!(f, "number"),
            ScalarKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Format hint detected on string values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    DateTime,
    Date,
    Uri,
}

impl std::fmt::Display for StringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringFormat::DateTime => write!(f, "date-time"),
            StringFormat::Date => write!(f, "date"),
            StringFormat::Uri => write!(f, "uri"),
        }
    }
}

/// Structural description of a JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Descriptor {
    /// Only `null` was observed, nothing is known about the type
    Null,
    /// Observed values could not be reconciled
    Any,
    /// A scalar value
    Scalar {
        kind: ScalarKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
    },
    /// A list whose elements share one descriptor
    List { items: Box<Descriptor> },
    /// An object with named fields
    Record(RecordDescriptor),
}

impl Descriptor {
    /// Create a scalar descriptor without a format hint
    pub fn scalar(kind: ScalarKind) -> Self {
        Descriptor::Scalar { kind, format: None }
    }

    /// Create a list descriptor
    pub fn list(items: Descriptor) -> Self {
        Descriptor::List {
            items: Box::new(items),
        }
    }

    /// Check if this is the null descriptor
    pub fn is_null(&self) -> bool {
        matches!(self, Descriptor::Null)
    }

    /// Check if this is the any descriptor
    pub fn is_any(&self) -> bool {
        matches!(self, Descriptor::Any)
    }

    /// Get the record descriptor, if any
    pub fn as_record(&self) -> Option<&RecordDescriptor> {
        match self {
            Descriptor::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Get the list item descriptor, if any
    pub fn items(&self) -> Option<&Descriptor> {
        match self {
            Descriptor::List { items } => Some(items),
            _ => None,
        }
    }

    /// Get the scalar kind, if any
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Descriptor::Scalar { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Descriptor::Null => write!(f, "null"),
            Descriptor::Any => write!(f, "any"),
            Descriptor::Scalar { kind, .. } => write!(f, "{kind}"),
            Descriptor::List { items } => write!(f, "list<{items}>"),
            Descriptor::Record(record) => write!(f, "{}", record.context),
        }
    }
}

/// A field of a record descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field type
    pub descriptor: Descriptor,
    /// Whether every observed instance carried a non-null value
    pub required: bool,
}

impl FieldDescriptor {
    /// Create a required field
    pub fn required(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            required: true,
        }
    }

    /// Create an optional field
    pub fn optional(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            required: false,
        }
    }
}

/// Shape of a JSON object observed under a naming context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Naming context the shape was observed under
    pub context: String,
    /// Fields in first-seen order
    #[serde(default)]
    pub fields: IndexMap<String, FieldDescriptor>,
}

impl RecordDescriptor {
    /// Create an empty record descriptor
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add or replace a field
    pub fn insert(&mut self, name: impl Into<String>, field: FieldDescriptor) {
        self.fields.insert(name.into(), field);
    }

    /// Get a field
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Check if a field is required
    pub fn is_required(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|f| f.required)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Order-independent set of field names, used as the cache signature
    pub fn signature(&self) -> BTreeSet<&str> {
        self.field_names().collect()
    }
}
