//! YouVersion API clients
//!
//! - [`Client`] - async client, one request per call
//! - [`blocking::Client`] - the same surface on a private runtime
//!
//! Both return [`Model`](crate::model::Model) trees whose record types are
//! learned from the responses and shared through the client's type cache.

mod api;
pub mod blocking;
mod endpoints;
mod links;

pub use api::Client;
