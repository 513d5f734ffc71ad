//! Materialized instances

use super::types::RecordType;
use crate::types::JsonValue;
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

static NULL: Model = Model::Scalar(Value::Null);

/// A materialized value: a scalar passthrough, a list, or a typed record
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Scalar(JsonValue),
    List(Vec<Model>),
    Record(Record),
}

impl Model {
    /// Get a record field, `None` for non-records and absent fields
    pub fn get(&self, field: &str) -> Option<&Model> {
        self.as_record().and_then(|record| record.get(field))
    }

    /// Get the record, if any
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Model::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Get the list elements, if any
    pub fn as_list(&self) -> Option<&[Model]> {
        match self {
            Model::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the raw scalar, if any
    pub fn as_scalar(&self) -> Option<&JsonValue> {
        match self {
            Model::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Get a string scalar
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }

    /// Get an integer scalar as `i64`
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Value::as_i64)
    }

    /// Get a non-negative integer scalar as `u64`
    pub fn as_u64(&self) -> Option<u64> {
        self.as_scalar().and_then(Value::as_u64)
    }

    /// Get a numeric scalar as `f64`
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Value::as_f64)
    }

    /// Get a boolean scalar
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Value::as_bool)
    }

    /// Check if this is a null scalar
    pub fn is_null(&self) -> bool {
        matches!(self, Model::Scalar(Value::Null))
    }

    /// Parse a string scalar as a UTC timestamp
    ///
    /// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS` (taken as UTC).
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        let s = self.as_str()?;
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.and_utc())
            })
    }

    /// Number of list elements or record fields, 0 for scalars
    pub fn len(&self) -> usize {
        match self {
            Model::Scalar(_) => 0,
            Model::List(items) => items.len(),
            Model::Record(record) => record.fields.len(),
        }
    }

    /// Check if there are no list elements or record fields
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a plain JSON value
    pub fn to_value(&self) -> JsonValue {
        self.to_value_with(&ExportOptions::default())
    }

    /// Convert to a plain JSON value, filtering top-level record fields
    ///
    /// For lists the filter applies to each element record.
    pub fn to_value_with(&self, options: &ExportOptions) -> JsonValue {
        match self {
            Model::Scalar(value) => value.clone(),
            Model::List(items) => {
                Value::Array(items.iter().map(|item| item.to_value_with(options)).collect())
            }
            Model::Record(record) => record.to_value_with(options),
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Serialize to an indented JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

impl std::ops::Index<&str> for Model {
    type Output = Model;

    /// Field access; absent fields and non-records yield a null scalar
    fn index(&self, field: &str) -> &Model {
        self.get(field).unwrap_or(&NULL)
    }
}

impl std::ops::Index<usize> for Model {
    type Output = Model;

    /// Element access; out-of-range indexes and non-lists yield a null scalar
    fn index(&self, index: usize) -> &Model {
        self.as_list()
            .and_then(|items| items.get(index))
            .unwrap_or(&NULL)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Model::Scalar(value) => value.serialize(serializer),
            Model::List(items) => serializer.collect_seq(items),
            Model::Record(record) => record.serialize(serializer),
        }
    }
}

impl From<Record> for Model {
    fn from(record: Record) -> Self {
        Model::Record(record)
    }
}

/// An instance of a record type
///
/// Holds the fields present in the source value, in source order. Optional
/// fields that were absent are not stored.
#[derive(Clone)]
pub struct Record {
    record_type: Arc<RecordType>,
    fields: IndexMap<String, Model>,
}

impl Record {
    pub(crate) fn new(record_type: Arc<RecordType>, fields: IndexMap<String, Model>) -> Self {
        Self {
            record_type,
            fields,
        }
    }

    /// The record's type definition
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Type name
    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    /// Check if two records are instances of the same definition
    pub fn same_type(&self, other: &Record) -> bool {
        RecordType::same(&self.record_type, &other.record_type)
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Model> {
        self.fields.get(field)
    }

    /// Check if a field is present on this instance
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Present fields in source order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Convert to a JSON object
    pub fn to_value(&self) -> JsonValue {
        self.to_value_with(&ExportOptions::default())
    }

    /// Convert to a JSON object keeping only the fields selected by `options`
    pub fn to_value_with(&self, options: &ExportOptions) -> JsonValue {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(name, _)| options.keeps(name))
            .map(|(name, value)| (name.clone(), value.to_value()))
            .collect();
        Value::Object(map)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Serialize to an indented JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.fields == other.fields
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for (name, value) in &self.fields {
            out.field(name, value);
        }
        out.finish()
    }
}

impl std::ops::Index<&str> for Record {
    type Output = Model;

    fn index(&self, field: &str) -> &Model {
        self.get(field).unwrap_or(&NULL)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Field filters applied when exporting a record
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Keep only these fields (all fields when `None`)
    pub include: Option<HashSet<String>>,
    /// Drop these fields
    pub exclude: HashSet<String>,
}

impl ExportOptions {
    /// Export everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the given fields
    #[must_use]
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the given fields
    #[must_use]
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(fields.into_iter().map(Into::into));
        self
    }

    fn keeps(&self, field: &str) -> bool {
        !self.exclude.contains(field)
            && self
                .include
                .as_ref()
                .map_or(true, |include| include.contains(field))
    }
}
