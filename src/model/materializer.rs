//! Model materializer
//!
//! Turns decoded JSON into [`Model`] trees backed by cached record types.
//! Children are built before their parent; the cache lock is only taken
//! inside [`TypeCache::resolve`], never across recursion.

use super::cache::TypeCache;
use super::instance::{Model, Record};
use super::types::RecordType;
use crate::error::{Error, Result};
use crate::schema::{element_context, type_name, Descriptor, RecordDescriptor, SchemaInferrer};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Materializer owning a session's type cache
#[derive(Debug, Default)]
pub struct Materializer {
    inferrer: SchemaInferrer,
    cache: TypeCache,
}

impl Materializer {
    /// Create a materializer with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a materializer with a custom inferrer
    pub fn with_inferrer(inferrer: SchemaInferrer) -> Self {
        Self {
            inferrer,
            cache: TypeCache::new(),
        }
    }

    /// A materializer with the same settings and a fresh, empty cache
    pub fn detached(&self) -> Self {
        Self::with_inferrer(self.inferrer.clone())
    }

    /// The type cache
    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    /// Infer the descriptor of a value without touching the cache
    pub fn infer(&self, value: &Value, context: &str) -> Descriptor {
        self.inferrer.infer(value, context)
    }

    /// Materialize a decoded value under a naming context
    ///
    /// Objects become [`Model::Record`], arrays become [`Model::List`] and
    /// scalars pass through unchanged.
    pub fn materialize(&self, value: &Value, context: &str) -> Result<Model> {
        let descriptor = self.inferrer.infer(value, context);
        self.build(value, &descriptor, context)
    }

    fn build(&self, value: &Value, descriptor: &Descriptor, context: &str) -> Result<Model> {
        match (value, descriptor) {
            (Value::Object(map), Descriptor::Record(shape)) => {
                self.build_record(map, shape).map(Model::Record)
            }
            (Value::Array(items), Descriptor::List { items: element }) => {
                let context = element_context(context);
                items
                    .iter()
                    .map(|item| self.build(item, element, &context))
                    .collect::<Result<Vec<_>>>()
                    .map(Model::List)
            }
            // Widened past the value's own shape; learn it from this value alone
            (Value::Object(_) | Value::Array(_), _) => self.materialize(value, context),
            (scalar, _) => Ok(Model::Scalar(scalar.clone())),
        }
    }

    fn build_record(&self, map: &Map<String, Value>, shape: &RecordDescriptor) -> Result<Record> {
        let mut fields = IndexMap::with_capacity(map.len());
        for (key, val) in map {
            let child = match shape.field(key) {
                Some(field) => self.build(val, &field.descriptor, &type_name(key))?,
                None => self.materialize(val, &type_name(key))?,
            };
            fields.insert(key.clone(), child);
        }

        let record_type = self.cache.resolve(shape);
        validate(&record_type, map)?;

        // Keep source order, restricted to declared fields
        fields.retain(|name, _| record_type.has_field(name));

        Ok(Record::new(record_type, fields))
    }
}

/// Check a source object against a record type definition
fn validate(record_type: &Arc<RecordType>, map: &Map<String, Value>) -> Result<()> {
    for (name, field) in record_type.fields() {
        let received = match map.get(name) {
            None if field.required => "missing",
            None => continue,
            Some(Value::Null) => {
                if field.required {
                    debug!(
                        context = %record_type.context(),
                        field = %name,
                        "Accepting null for a field observed with a value"
                    );
                }
                continue;
            }
            Some(value) if conforms(&field.descriptor, value) => continue,
            Some(value) => value_kind(value),
        };

        return Err(Error::validation(
            record_type.context(),
            name.as_str(),
            field.descriptor.to_string(),
            received,
        ));
    }
    Ok(())
}

/// Check that a value's structure matches a declared descriptor
///
/// Scalar kinds are not enforced: a scalar of another kind is accepted.
fn conforms(descriptor: &Descriptor, value: &Value) -> bool {
    match descriptor {
        Descriptor::Any | Descriptor::Null => true,
        Descriptor::Record(_) => value.is_object(),
        Descriptor::List { .. } => value.is_array(),
        Descriptor::Scalar { kind, .. } => match value {
            Value::Object(_) | Value::Array(_) => false,
            scalar => {
                let received = value_kind(scalar);
                if received != kind.to_string() {
                    debug!(expected = %kind, received, "Coercing scalar of a different kind");
                }
                true
            }
        },
    }
}

/// Kind name of a value as reported in validation errors
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
