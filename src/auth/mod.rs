//! Authentication module
//!
//! Supports: no auth, pre-issued bearer tokens and the OAuth2 password grant.
//!
//! The `Authenticator` caches the access token issued by the password grant
//! and refreshes it shortly before it expires.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken};

#[cfg(test)]
mod tests;
