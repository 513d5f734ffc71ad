//! Record type definitions

use crate::schema::{FieldDescriptor, RecordDescriptor};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A named, immutable record type created by the type cache
///
/// Definitions are shared as `Arc<RecordType>`; two instances have the same
/// type when their definitions are the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    /// Generated type name (`Moment`, `Moment2`, ...)
    name: String,
    /// Naming context the type was created under
    context: String,
    /// Declared fields in first-seen order
    fields: IndexMap<String, FieldDescriptor>,
}

impl RecordType {
    /// Create a definition from an observed record shape
    pub fn from_shape(name: impl Into<String>, shape: &RecordDescriptor) -> Self {
        Self {
            name: name.into(),
            context: shape.context.clone(),
            fields: shape.fields.clone(),
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Naming context
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Declared fields
    pub fn fields(&self) -> &IndexMap<String, FieldDescriptor> {
        &self.fields
    }

    /// Get a declared field
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Check if a field is declared
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Order-independent set of declared field names
    pub fn signature(&self) -> BTreeSet<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Check if this type declares every field in `signature` and at least one more
    pub fn covers(&self, signature: &BTreeSet<&str>) -> bool {
        self.fields.len() > signature.len() && signature.iter().all(|name| self.has_field(name))
    }

    /// Check if two shared definitions are the same type
    pub fn same(a: &Arc<RecordType>, b: &Arc<RecordType>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
