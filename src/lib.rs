// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # YouVersion Bible API client
//!
//! An async (and blocking) client for the YouVersion APIs. Responses are
//! schema-less JSON; instead of hand-written models, the client infers a
//! structural descriptor for every response and materializes it into typed
//! records whose definitions are learned once and reused.
//!
//! ## Features
//!
//! - **Schema Inference**: Descriptors for arbitrary JSON, with unification across samples
//! - **Type Cache**: Record definitions keyed by naming context and field set
//! - **Validation**: Later responses are checked against what was learned earlier
//! - **Export**: Models round-trip to JSON, with field include/exclude filters
//! - **Auth**: OAuth2 password grant with a cached token, or a pre-issued bearer token
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use youversion::{Client, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("youversion.yaml")?.with_env_overrides();
//!     let client = Client::new(config)?;
//!
//!     let votd = client.verse_of_the_day(None).await?;
//!     println!("{}", votd["usfm"][0].as_str().unwrap_or_default());
//!
//!     for highlight in client.highlights(1).await?.as_list().unwrap_or_default() {
//!         println!("{}", highlight.to_json());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │               Client / blocking::Client                      │
//! │   endpoint call → JSON → materialize(value, context) → Model │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────┬───────┴──────┬───────────────┬─────────┐
//! │   Auth   │   HTTP   │    Schema    │     Model     │ Config  │
//! ├──────────┼──────────┼──────────────┼───────────────┼─────────┤
//! │ Password │ GET/POST │ infer        │ TypeCache     │ YAML    │
//! │ Bearer   │ Headers  │ unify        │ Materializer  │ JSON    │
//! │ Token    │ Timeouts │ naming       │ Record/Model  │ Env     │
//! └──────────┴──────────┴──────────────┴───────────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Structural descriptors inferred from JSON
pub mod schema;

/// Type cache, materializer and materialized models
pub mod model;

/// Client configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// API clients
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{blocking, Client};
pub use config::{ClientConfig, Credentials, Endpoints, ValidationPolicy};
pub use error::{Error, Result};
pub use model::{ExportOptions, Materializer, Model, Record, RecordType, TypeCache};
pub use schema::{infer, unify, Descriptor};
pub use types::{JsonValue, MomentKind, MomentQuery, VersionType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
