//! Client configuration
//!
//! Every field has a default, so an empty YAML or JSON document is a valid
//! configuration. Credentials can be layered on from the environment.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URLs
    #[serde(default)]
    pub endpoints: Endpoints,

    /// OAuth2 token endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// OAuth2 client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Account credentials for the password grant
    #[serde(default)]
    pub credentials: Option<Credentials>,

    /// Pre-issued bearer token, used instead of the password grant
    #[serde(default)]
    pub access_token: Option<String>,

    /// Headers sent with every API request
    #[serde(default = "default_headers")]
    pub default_headers: StringMap,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// What to do when a response fails model validation
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            auth_url: default_auth_url(),
            client_id: None,
            client_secret: None,
            credentials: None,
            access_token: None,
            default_headers: default_headers(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            validation: ValidationPolicy::default(),
        }
    }
}

fn default_auth_url() -> String {
    "https://auth.youversionapi.com/token".to_string()
}

fn default_headers() -> StringMap {
    [
        ("Referer", "http://android.youversionapi.com/"),
        ("X-YouVersion-App-Platform", "android"),
        ("X-YouVersion-App-Version", "17114"),
        ("X-YouVersion-Client", "youversion"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") | None => Self::from_yaml_str(&content),
            Some(other) => Err(Error::config(format!(
                "Unsupported config file extension '{other}'"
            ))),
        }
    }

    /// Overlay credentials from `YOUVERSION_*` environment variables
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay credentials using a custom variable lookup
    ///
    /// Reads `YOUVERSION_USERNAME`, `YOUVERSION_PASSWORD`, `YOUVERSION_CLIENT_ID`,
    /// `YOUVERSION_CLIENT_SECRET` and `YOUVERSION_ACCESS_TOKEN`. Empty values are ignored.
    #[must_use]
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(client_id) = var("YOUVERSION_CLIENT_ID") {
            self.client_id = Some(client_id);
        }
        if let Some(client_secret) = var("YOUVERSION_CLIENT_SECRET") {
            self.client_secret = Some(client_secret);
        }
        if let Some(token) = var("YOUVERSION_ACCESS_TOKEN") {
            self.access_token = Some(token);
        }

        let username = var("YOUVERSION_USERNAME");
        let password = var("YOUVERSION_PASSWORD");
        self.credentials = match (self.credentials.take(), username, password) {
            (Some(mut credentials), username, password) => {
                if let Some(username) = username {
                    credentials.username = username;
                }
                if let Some(password) = password {
                    credentials.password = password;
                }
                Some(credentials)
            }
            (None, Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        self
    }

    /// Set account credentials
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Set the OAuth2 client id and secret
    #[must_use]
    pub fn with_client(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the validation policy
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check URLs and limits
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfigValue {
                field: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        url::Url::parse(&self.auth_url)?;
        for (field, value) in self.endpoints.iter() {
            url::Url::parse(value).map_err(|e| Error::InvalidConfigValue {
                field: format!("endpoints.{field}"),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Authentication settings derived from this config
    ///
    /// A bearer token wins over credentials. Credentials require a client id
    /// and secret.
    pub fn auth_config(&self) -> Result<AuthConfig> {
        if let Some(token) = &self.access_token {
            return Ok(AuthConfig::Bearer {
                token: token.clone(),
            });
        }

        let Some(credentials) = &self.credentials else {
            return Ok(AuthConfig::None);
        };

        let client_id = self
            .client_id
            .clone()
            .ok_or_else(|| Error::missing_field("client_id"))?;
        let client_secret = self
            .client_secret
            .clone()
            .ok_or_else(|| Error::missing_field("client_secret"))?;

        Ok(AuthConfig::Password {
            token_url: self.auth_url.clone(),
            client_id,
            client_secret,
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        })
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Base URLs of the API services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub moments: String,
    pub bible: String,
    pub audio_bible: String,
    pub search: String,
    pub videos: String,
    pub events: String,
    pub badges: String,
    pub images: String,
    pub friendships: String,
    pub themes: String,
    /// Full URL of the verse-of-the-day feed
    pub votd_url: String,
    /// Website that relative moment links resolve against
    pub web: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            moments: "https://moments.youversionapi.com".to_string(),
            bible: "https://bible.youversionapi.com".to_string(),
            audio_bible: "http://audio-bible.youversionapi.com".to_string(),
            search: "https://search.youversionapi.com".to_string(),
            videos: "https://videos.youversionapi.com".to_string(),
            events: "https://events.youversionapi.com".to_string(),
            badges: "https://badges.youversionapi.com".to_string(),
            images: "https://images.youversionapi.com".to_string(),
            friendships: "https://friendships.youversionapi.com".to_string(),
            themes: "https://themes.youversionapi.com".to_string(),
            votd_url: "https://nodejs.bible.com/api/moments/votd/3.1".to_string(),
            web: "https://my.bible.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at one base URL (mock servers, proxies)
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            moments: base.clone(),
            bible: base.clone(),
            audio_bible: base.clone(),
            search: base.clone(),
            videos: base.clone(),
            events: base.clone(),
            badges: base.clone(),
            images: base.clone(),
            friendships: base.clone(),
            themes: base.clone(),
            votd_url: format!("{base}/votd"),
            web: base,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("moments", self.moments.as_str()),
            ("bible", self.bible.as_str()),
            ("audio_bible", self.audio_bible.as_str()),
            ("search", self.search.as_str()),
            ("videos", self.videos.as_str()),
            ("events", self.events.as_str()),
            ("badges", self.badges.as_str()),
            ("images", self.images.as_str()),
            ("friendships", self.friendships.as_str()),
            ("themes", self.themes.as_str()),
            ("votd_url", self.votd_url.as_str()),
            ("web", self.web.as_str()),
        ]
        .into_iter()
    }
}

// ============================================================================
// Credentials & Policies
// ============================================================================

/// Account credentials
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Handling of responses that fail model validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Return the validation error
    #[default]
    Strict,
    /// Log a warning and rebuild the response against a throwaway type cache
    Lenient,
}
