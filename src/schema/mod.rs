//! Schema inference module
//!
//! Derives structural descriptors from schema-less JSON payloads.
//!
//! # Features
//!
//! - **Type Inference**: Infers scalar kinds, lists and records from JSON values
//! - **Unification**: Merges descriptors observed across list elements
//! - **Optional Detection**: Fields that are null or absent in some sibling become optional
//! - **Format Hints**: Detects date, date-time and URI strings
//! - **Naming**: Derives record type names from field names

mod inference;
pub mod naming;
mod types;

pub use inference::{infer, unify, SchemaInferrer};
pub use naming::{element_context, singularize, type_name};
pub use types::{Descriptor, FieldDescriptor, RecordDescriptor, ScalarKind, StringFormat};
