//! Authenticator implementation
//!
//! Applies credentials to requests and manages the cached OAuth2 token.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for the password grant
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::Password { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token.token))
            }
        }
    }

    /// Current access token, fetching one if needed
    pub async fn access_token(&self) -> Result<String> {
        match &self.config {
            AuthConfig::None => Err(Error::auth("No credentials configured")),
            AuthConfig::Bearer { token } => Ok(token.clone()),
            AuthConfig::Password { .. } => Ok(self.get_or_refresh_token().await?.token),
        }
    }

    /// Account id reported with the token, fetching a token if needed
    pub async fn user_id(&self) -> Result<Option<u64>> {
        match &self.config {
            AuthConfig::Password { .. } => Ok(self.get_or_refresh_token().await?.user_id),
            AuthConfig::None | AuthConfig::Bearer { .. } => Ok(None),
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<CachedToken> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        *cached = Some(new_token.clone());

        Ok(new_token)
    }

    /// Fetch a new token using the password grant
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        let AuthConfig::Password {
            token_url,
            client_id,
            client_secret,
            username,
            password,
        } = &self.config
        else {
            return Err(Error::auth("Token refresh not supported for this auth type"));
        };

        let form = [
            ("grant_type", "password"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("username", username.as_str()),
            ("password", password.as_str()),
        ];

        let response = self
            .http_client
            .post(token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::OAuth2 {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        let token = token_response.into_cached_token();

        info!(user_id = ?token.user_id, "Obtained access token");
        Ok(token)
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user_id: Option<UserId>,
}

/// Account id, sent as a number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserId {
    Number(u64),
    Text(String),
}

impl UserId {
    fn into_u64(self) -> Option<u64> {
        match self {
            UserId::Number(id) => Some(id),
            UserId::Text(id) => id.parse().ok(),
        }
    }
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        let user_id = self.user_id.and_then(UserId::into_u64);
        let token = match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        };
        token.with_user_id(user_id)
    }
}
