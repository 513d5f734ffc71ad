//! Schema inference from JSON values

use super::naming::{element_context, type_name};
use super::types::{Descriptor, FieldDescriptor, RecordDescriptor, ScalarKind, StringFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// ISO 8601 date-time, `T` or space separated
static DATETIME_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").ok());

/// ISO 8601 calendar date
static DATE_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok());

/// Schema inferrer with configuration options
///
/// Inference is pure: it never fails and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    /// Detect date and date-time formats
    detect_datetime: bool,
    /// Detect URI formats
    detect_uri: bool,
    /// Nesting depth past which values are described as `Any`
    max_depth: usize,
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self {
            detect_datetime: true,
            detect_uri: true,
            max_depth: 32,
        }
    }

    /// Enable/disable date and date-time detection
    #[must_use]
    pub fn with_datetime_detection(mut self, enabled: bool) -> Self {
        self.detect_datetime = enabled;
        self
    }

    /// Enable/disable URI detection
    #[must_use]
    pub fn with_uri_detection(mut self, enabled: bool) -> Self {
        self.detect_uri = enabled;
        self
    }

    /// Set maximum nesting depth (at least 1)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Infer the descriptor of a value observed under `context`
    pub fn infer(&self, value: &Value, context: &str) -> Descriptor {
        self.infer_at(value, context, 0)
    }

    /// Infer one descriptor covering every record in `records`
    ///
    /// Each record is inferred under `context` as-is; use this when the
    /// caller already holds the element context of a list.
    pub fn infer_records(&self, records: &[Value], context: &str) -> Descriptor {
        records
            .iter()
            .map(|record| self.infer_at(record, context, 0))
            .reduce(|acc, next| unify(&acc, &next))
            .unwrap_or(Descriptor::Null)
    }

    fn infer_at(&self, value: &Value, context: &str, depth: usize) -> Descriptor {
        if depth >= self.max_depth {
            return Descriptor::Any;
        }

        match value {
            Value::Null => Descriptor::Null,
            Value::String(s) => Descriptor::Scalar {
                kind: ScalarKind::String,
                format: self.detect_format(s),
            },
            Value::Bool(_) | Value::Number(_) => {
                ScalarKind::of(value).map_or(Descriptor::Any, Descriptor::scalar)
            }
            Value::Array(items) => self.infer_list(items, context, depth),
            Value::Object(map) => Descriptor::Record(self.infer_object(map, context, depth)),
        }
    }

    fn infer_list(&self, items: &[Value], context: &str, depth: usize) -> Descriptor {
        let element = element_context(context);

        let unified = items
            .iter()
            .map(|item| self.infer_at(item, &element, depth + 1))
            .reduce(|acc, next| unify(&acc, &next));

        // Empty list - nothing to learn from
        Descriptor::list(unified.unwrap_or(Descriptor::Any))
    }

    fn infer_object(&self, map: &Map<String, Value>, context: &str, depth: usize) -> RecordDescriptor {
        let mut record = RecordDescriptor::new(context);

        for (key, val) in map {
            let descriptor = self.infer_at(val, &type_name(key), depth + 1);
            let field = if val.is_null() {
                FieldDescriptor::optional(descriptor)
            } else {
                FieldDescriptor::required(descriptor)
            };
            record.insert(key.clone(), field);
        }

        record
    }

    fn detect_format(&self, s: &str) -> Option<StringFormat> {
        if self.detect_datetime && is_datetime(s) {
            Some(StringFormat::DateTime)
        } else if self.detect_datetime && is_date(s) {
            Some(StringFormat::Date)
        } else if self.detect_uri && is_uri(s) {
            Some(StringFormat::Uri)
        } else {
            None
        }
    }
}

/// Infer the descriptor of a value with default settings (convenience function)
pub fn infer(value: &Value, context: &str) -> Descriptor {
    SchemaInferrer::new().infer(value, context)
}

/// Unify two descriptors into the narrowest descriptor covering both
pub fn unify(a: &Descriptor, b: &Descriptor) -> Descriptor {
    match (a, b) {
        _ if a == b => a.clone(),
        (Descriptor::Null, other) | (other, Descriptor::Null) => other.clone(),
        (Descriptor::Any, _) | (_, Descriptor::Any) => Descriptor::Any,
        (
            Descriptor::Scalar {
                kind: left,
                format: left_format,
            },
            Descriptor::Scalar {
                kind: right,
                format: right_format,
            },
        ) => match left.merge_with(*right) {
            Some(kind) => Descriptor::Scalar {
                kind,
                format: if left_format == right_format {
                    *left_format
                } else {
                    None
                },
            },
            None => {
                debug!(left = %left, right = %right, "Widening irreconcilable scalar kinds to any");
                Descriptor::Any
            }
        },
        (Descriptor::List { items: left }, Descriptor::List { items: right }) => {
            match (left.as_ref(), right.as_ref()) {
                // An empty list contributes no evidence
                (Descriptor::Any, other) | (other, Descriptor::Any) => Descriptor::list(other.clone()),
                (left, right) => Descriptor::list(unify(left, right)),
            }
        }
        (Descriptor::Record(left), Descriptor::Record(right)) => {
            Descriptor::Record(unify_records(left, right))
        }
        _ => {
            debug!(left = %a, right = %b, "Widening irreconcilable descriptors to any");
            Descriptor::Any
        }
    }
}

/// Merge two record descriptors over the union of their fields
fn unify_records(a: &RecordDescriptor, b: &RecordDescriptor) -> RecordDescriptor {
    let mut merged = RecordDescriptor::new(a.context.clone());

    for (name, left) in &a.fields {
        let field = match b.fields.get(name) {
            Some(right) => FieldDescriptor {
                descriptor: unify(&left.descriptor, &right.descriptor),
                required: left.required && right.required,
            },
            // Missing in b
            None => FieldDescriptor::optional(left.descriptor.clone()),
        };
        merged.insert(name.clone(), field);
    }

    for (name, right) in &b.fields {
        if !a.fields.contains_key(name) {
            merged.insert(name.clone(), FieldDescriptor::optional(right.descriptor.clone()));
        }
    }

    merged
}

// Format detection helpers

fn is_datetime(s: &str) -> bool {
    DATETIME_RE.as_ref().is_some_and(|re| re.is_match(s))
}

fn is_date(s: &str) -> bool {
    DATE_RE.as_ref().is_some_and(|re| re.is_match(s))
}

fn is_uri(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
