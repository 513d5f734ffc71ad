//! Session-scoped cache of record type definitions

use super::types::RecordType;
use crate::schema::RecordDescriptor;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Cache of record type definitions keyed by naming context and field set
///
/// Definitions are never mutated or evicted individually; a new field set
/// under a known context creates a distinct definition.
#[derive(Debug, Default)]
pub struct TypeCache {
    /// Definitions per naming context, in creation order
    definitions: RwLock<HashMap<String, Vec<Arc<RecordType>>>>,
}

impl TypeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or create the definition for a record shape
    ///
    /// Resolution order:
    /// 1. a definition with exactly the same field names;
    /// 2. the smallest definition whose field names are a strict superset
    ///    (earliest on ties), so the value is validated against the richer
    ///    shape seen before;
    /// 3. a new definition, named after the context and suffixed from the
    ///    second definition on (`Moment`, `Moment2`, ...).
    pub fn resolve(&self, shape: &RecordDescriptor) -> Arc<RecordType> {
        let signature = shape.signature();

        {
            let definitions = self.definitions.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = definitions
                .get(&shape.context)
                .and_then(|defs| lookup(defs, &signature))
            {
                return found;
            }
        }

        let mut definitions = self.definitions.write().unwrap_or_else(PoisonError::into_inner);
        let defs = definitions.entry(shape.context.clone()).or_default();

        // Double-check after acquiring write lock (another thread might have inserted)
        if let Some(found) = lookup(defs, &signature) {
            return found;
        }

        let name = if defs.is_empty() {
            shape.context.clone()
        } else {
            format!("{}{}", shape.context, defs.len() + 1)
        };

        debug!(
            context = %shape.context,
            name = %name,
            fields = shape.fields.len(),
            "Created record type"
        );

        let record_type = Arc::new(RecordType::from_shape(name, shape));
        defs.push(Arc::clone(&record_type));
        record_type
    }

    /// Get the first definition created for a context
    pub fn get(&self, context: &str) -> Option<Arc<RecordType>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(context)
            .and_then(|defs| defs.first().cloned())
    }

    /// All definitions created for a context, in creation order
    pub fn definitions(&self, context: &str) -> Vec<Arc<RecordType>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(context)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of cached definitions
    pub fn len(&self) -> usize {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Check if the cache holds no definitions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached definition
    ///
    /// Instances built earlier keep their definitions alive.
    pub fn clear(&self) {
        self.definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Find the definition an incoming field set resolves to
fn lookup(defs: &[Arc<RecordType>], signature: &BTreeSet<&str>) -> Option<Arc<RecordType>> {
    defs.iter()
        .find(|def| def.signature() == *signature)
        .or_else(|| {
            defs.iter()
                .filter(|def| def.covers(signature))
                .min_by_key(|def| def.fields().len())
        })
        .cloned()
}
