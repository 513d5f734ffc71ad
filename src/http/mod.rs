//! HTTP client module
//!
//! Provides the single-attempt HTTP client used by the API client.
//!
//! # Features
//!
//! - **Default Headers**: Headers sent with every request
//! - **Authentication**: Integration with auth module
//! - **Error Mapping**: Error statuses and timeouts become crate errors
//! - **JSON Decoding**: Responses decoded to `serde_json::Value`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
