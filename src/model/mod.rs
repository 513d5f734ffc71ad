//! Model materialization module
//!
//! Builds validated, typed object trees from schema-less JSON.
//!
//! # Features
//!
//! - **Record Types**: Named, immutable definitions created on first sight of a shape
//! - **Type Cache**: Session-scoped reuse of definitions across calls
//! - **Validation**: Required fields and structural kinds are checked per instance
//! - **Export**: Instances convert back to plain JSON with field filters

mod cache;
mod instance;
mod materializer;
mod types;

pub use cache::TypeCache;
pub use instance::{ExportOptions, Model, Record};
pub use materializer::Materializer;
pub use types::RecordType;

#[cfg(test)]
mod tests;
