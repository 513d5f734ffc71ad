//! Async API client
//!
//! Every endpoint method issues one request and materializes the decoded
//! response under a fixed naming context, so repeated calls share record
//! types through the client's type cache.

use super::endpoints::{self, join};
use super::links::normalize_moment_links;
use crate::config::{ClientConfig, ValidationPolicy};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::model::{Materializer, Model};
use crate::types::{JsonValue, MomentKind, MomentQuery, StringMap, VersionType};
use chrono::Datelike;
use serde_json::json;
use tracing::{debug, warn};

/// Naming context of verse-of-the-day entries
const VOTD_CONTEXT: &str = "Votd";

/// Naming context of the unfiltered moments feed
const MOMENTS_CONTEXT: &str = "Moments";

/// Async YouVersion API client
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    http: HttpClient,
    materializer: Materializer,
}

impl Client {
    /// Create a client from a configuration
    ///
    /// No request is made; the password grant runs on the first
    /// authenticated call.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .timeout(config.timeout())
            .headers(config.default_headers.clone())
            .user_agent(config.user_agent.clone())
            .build();
        let http = HttpClient::with_auth(http_config, config.auth_config()?)?;

        Ok(Self {
            config,
            http,
            materializer: Materializer::new(),
        })
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The materializer holding this client's type cache
    pub fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// Obtain an access token now instead of on first use
    pub async fn authenticate(&self) -> Result<()> {
        self.require_auth()?.access_token().await.map(|_| ())
    }

    /// Account id reported by the token endpoint
    pub async fn user_id(&self) -> Result<Option<u64>> {
        match self.http.authenticator() {
            Some(auth) => auth.user_id().await,
            None => Ok(None),
        }
    }

    /// Materialize a caller-supplied payload, honoring the validation policy
    pub fn materialize(&self, value: &JsonValue, context: &str) -> Result<Model> {
        match self.materializer.materialize(value, context) {
            Err(err) if err.is_validation() && self.config.validation == ValidationPolicy::Lenient => {
                warn!(context, error = %err, "Response failed validation, using a detached type cache");
                self.materializer.detached().materialize(value, context)
            }
            result => result,
        }
    }

    /// Release cached credentials and learned record types
    pub async fn close(&self) {
        if let Some(auth) = self.http.authenticator() {
            auth.clear_cache().await;
        }
        self.materializer.cache().clear();
        debug!("Client closed");
    }

    // ========================================================================
    // Verse of the day
    // ========================================================================

    /// Every entry of the verse-of-the-day feed
    pub async fn verses_of_the_day(&self) -> Result<Model> {
        let entries = self.votd_entries().await?;
        self.materialize(&JsonValue::Array(entries), VOTD_CONTEXT)
    }

    /// Verse of the day for a day of the year (today when `None`)
    ///
    /// The default is today's ordinal day (1 to 366) in local time, matching
    /// how the feed numbers its entries, not the day of the month. Falls back
    /// to the first entry when no entry matches the day.
    pub async fn verse_of_the_day(&self, day: Option<u32>) -> Result<Model> {
        let day = day.unwrap_or_else(|| chrono::Local::now().ordinal());
        let entries = self.votd_entries().await?;

        let entry = entries
            .iter()
            .find(|entry| entry.get("day").and_then(JsonValue::as_u64) == Some(u64::from(day)))
            .or_else(|| entries.first())
            .ok_or_else(|| Error::not_found(format!("No verse of the day found for day {day}")))?;

        self.materialize(entry, VOTD_CONTEXT)
    }

    async fn votd_entries(&self) -> Result<Vec<JsonValue>> {
        let data = self
            .http
            .get_json(&self.config.endpoints.votd_url, RequestConfig::new())
            .await?;

        match data {
            JsonValue::Object(mut map) => match map.remove("votd") {
                Some(JsonValue::Array(entries)) => Ok(entries),
                _ => Ok(Vec::new()),
            },
            JsonValue::Array(entries) => Ok(entries),
            _ => Ok(Vec::new()),
        }
    }

    // ========================================================================
    // Moments
    // ========================================================================

    /// All moments, unfiltered
    pub async fn moments(&self, page: u32) -> Result<Model> {
        self.moment_feed(None, page).await
    }

    /// Highlighted verses
    pub async fn highlights(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::Highlight), page).await
    }

    /// Notes
    pub async fn notes(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::Note), page).await
    }

    /// Bookmarks
    pub async fn bookmarks(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::Bookmark), page).await
    }

    /// Verse images created by the account
    pub async fn my_images(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::Image), page).await
    }

    /// Completed reading plan segments
    pub async fn plan_progress(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::PlanSegmentCompletion), page)
            .await
    }

    /// Reading plan subscriptions
    pub async fn plan_subscriptions(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::PlanSubscription), page)
            .await
    }

    /// Completed reading plans
    pub async fn plan_completions(&self, page: u32) -> Result<Model> {
        self.moment_feed(Some(MomentKind::PlanCompletion), page).await
    }

    /// One page of the moments feed, filtered
    ///
    /// Lists the signed-in account's moments unless the query names another
    /// user. Relative links in each moment are made absolute against the
    /// configured website.
    pub async fn query_moments(&self, query: &MomentQuery) -> Result<Model> {
        let auth = self.require_auth()?;
        let user_id = match query.user_id {
            Some(user_id) => Some(user_id),
            None => auth.user_id().await?,
        };

        let request = RequestConfig::new()
            .query("page", query.page)
            .query_opt("kind", query.kind.map(MomentKind::as_str))
            .query_opt("user_id", user_id)
            .query_opt("version_id", query.version_id)
            .query_opt("usfm", query.usfm.as_deref());
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_ITEMS);
        let data = self.http.get_json(&url, request).await?;

        let mut moments = data
            .pointer("/response/data/moments")
            .or_else(|| data.get("moments"))
            .cloned()
            .unwrap_or_else(|| JsonValue::Array(Vec::new()));
        normalize_moment_links(&mut moments, &self.config.endpoints.web);

        let context = query.kind.map_or(MOMENTS_CONTEXT, MomentKind::context);
        self.materialize(&moments, context)
    }

    async fn moment_feed(&self, kind: Option<MomentKind>, page: u32) -> Result<Model> {
        let query = MomentQuery {
            page,
            kind,
            ..MomentQuery::default()
        };
        self.query_moments(&query).await
    }

    /// One moment with its comments and likes
    pub async fn moment_details(&self, moment_id: u64) -> Result<Model> {
        self.require_auth()?;
        let request = RequestConfig::new().query("id", moment_id);
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_VIEW);
        let mut data = self.http.get_json(&url, request).await?;

        match data.pointer_mut("/response/data") {
            Some(moment) => normalize_moment_links(moment, &self.config.endpoints.web),
            None => normalize_moment_links(&mut data, &self.config.endpoints.web),
        }
        self.materialize(&data, "MomentDetails")
    }

    /// Create a moment from a caller-built payload
    pub async fn create_moment(&self, moment: JsonValue) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_CREATE);
        self.post(&url, moment, "CreatedMoment").await
    }

    /// Update a moment from a caller-built payload carrying its `id`
    pub async fn update_moment(&self, moment: JsonValue) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_UPDATE);
        self.post(&url, moment, "UpdatedMoment").await
    }

    /// Colors available for highlights
    pub async fn moment_colors(&self) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_COLORS);
        self.get(&url, RequestConfig::new(), "MomentColors").await
    }

    /// Labels used on bookmarks
    pub async fn moment_labels(&self) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_LABELS);
        self.get(&url, RequestConfig::new(), "MomentLabels").await
    }

    /// Highlight colors the account applied to a verse
    pub async fn verse_colors(&self, usfm: &str, version_id: u64) -> Result<Model> {
        self.require_auth()?;
        let request = RequestConfig::new()
            .query("usfm", usfm)
            .query("version_id", version_id);
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_VERSE_COLORS);
        self.get(&url, request, "VerseColors").await
    }

    /// Hide highlight colors, as described by a caller-built payload
    pub async fn hide_verse_colors(&self, colors: JsonValue) -> Result<Model> {
        self.require_auth()?;
        let url = join(
            &self.config.endpoints.moments,
            endpoints::MOMENTS_HIDE_VERSE_COLORS,
        );
        self.post(&url, colors, "HiddenVerseColors").await
    }

    /// Moments service configuration
    pub async fn moments_configuration(&self) -> Result<Model> {
        let url = join(
            &self.config.endpoints.moments,
            endpoints::MOMENTS_CONFIGURATION,
        );
        self.get(&url, RequestConfig::new(), "MomentsConfiguration")
            .await
    }

    /// Comment on a moment
    pub async fn create_comment(&self, moment_id: u64, comment: &str) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::COMMENTS_CREATE);
        let body = json!({ "moment_id": moment_id, "comment": comment });
        self.post(&url, body, "Comment").await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::COMMENTS_DELETE);
        self.post(&url, json!({ "id": comment_id }), "DeletedComment")
            .await
    }

    /// Like a moment
    pub async fn like_moment(&self, moment_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::LIKES_CREATE);
        self.post(&url, json!({ "moment_id": moment_id }), "Like").await
    }

    /// Remove a like from a moment
    pub async fn unlike_moment(&self, moment_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::LIKES_DELETE);
        self.post(&url, json!({ "moment_id": moment_id }), "Unlike").await
    }

    /// Delete a moment
    pub async fn delete_moment(&self, moment_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.moments, endpoints::MOMENTS_DELETE);
        self.post(&url, json!({ "id": moment_id }), "DeletedMoment").await
    }

    // ========================================================================
    // Messaging
    // ========================================================================

    /// Register a device for push notifications
    ///
    /// `previous_device_id` replaces an earlier registration of the same device.
    pub async fn register_device(
        &self,
        device_id: &str,
        device_type: &str,
        previous_device_id: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Model> {
        let user_id = self.require_auth()?.user_id().await?;

        let mut form = StringMap::new();
        form.insert("id".to_string(), device_id.to_string());
        form.insert("type".to_string(), device_type.to_string());
        if let Some(user_id) = user_id {
            form.insert("user_id".to_string(), user_id.to_string());
        }
        if let Some(old_id) = previous_device_id {
            form.insert("old_id".to_string(), old_id.to_string());
        }
        if let Some(tags) = tags {
            form.insert("tags".to_string(), tags.to_string());
        }

        let url = join(&self.config.endpoints.moments, endpoints::MESSAGING_REGISTER);
        let data = self
            .http
            .post_json(&url, RequestConfig::new().form(form))
            .await?;
        self.materialize(&data, "DeviceRegistration")
    }

    /// Stop push notifications to a device
    pub async fn unregister_device(&self, device_id: &str) -> Result<Model> {
        self.require_auth()?;
        let url = join(
            &self.config.endpoints.moments,
            endpoints::MESSAGING_UNREGISTER,
        );
        self.post(&url, json!({ "id": device_id }), "DeviceUnregistration")
            .await
    }

    /// Translated interface strings for a language, as a gettext PO document
    pub async fn localization_items(&self, language_tag: &str) -> Result<String> {
        let request = RequestConfig::new().query("language_tag", language_tag);
        let url = join(&self.config.endpoints.moments, endpoints::LOCALIZATION_ITEMS);
        self.http.get_text(&url, request).await
    }

    // ========================================================================
    // Themes
    // ========================================================================

    /// Reader themes available in a language
    pub async fn themes(&self, language_tag: &str, page: u32) -> Result<Model> {
        let request = RequestConfig::new()
            .query("page", page)
            .query("language_tag", language_tag);
        let url = join(&self.config.endpoints.themes, endpoints::THEMES_ITEMS);
        self.get(&url, request, "Themes").await
    }

    /// Add a theme to the account
    pub async fn add_theme(&self, theme_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.themes, endpoints::THEMES_ADD);
        self.post(&url, json!({ "id": theme_id }), "AddedTheme").await
    }

    /// Remove a theme from the account
    pub async fn remove_theme(&self, theme_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.themes, endpoints::THEMES_REMOVE);
        self.post(&url, json!({ "id": theme_id }), "RemovedTheme")
            .await
    }

    /// Make a theme the active one
    pub async fn set_theme(&self, theme_id: u64, previous_theme_id: Option<u64>) -> Result<Model> {
        self.require_auth()?;
        let mut body = json!({ "id": theme_id });
        if let Some(previous_id) = previous_theme_id {
            body["previous_id"] = json!(previous_id);
        }
        let url = join(&self.config.endpoints.themes, endpoints::THEMES_SET);
        self.post(&url, body, "ActiveTheme").await
    }

    /// A theme's description in a language
    pub async fn theme_description(&self, theme_id: u64, language_tag: &str) -> Result<Model> {
        let request = RequestConfig::new()
            .query("id", theme_id)
            .query("language_tag", language_tag);
        let url = join(&self.config.endpoints.themes, endpoints::THEMES_DESCRIPTION);
        self.get(&url, request, "ThemeDescription").await
    }

    // ========================================================================
    // Friendships
    // ========================================================================

    /// Offer friendship to another user
    pub async fn send_friend_request(&self, user_id: u64) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.friendships, endpoints::FRIENDSHIPS_OFFER);
        self.post(&url, json!({ "user_id": user_id }), "FriendRequest")
            .await
    }

    // ========================================================================
    // Badges
    // ========================================================================

    /// Badges earned by the account
    pub async fn badges(&self, page: u32) -> Result<Model> {
        let user_id = self.require_auth()?.user_id().await?;
        let request = RequestConfig::new()
            .query_opt("user_id", user_id)
            .query("page", page);
        let url = join(&self.config.endpoints.badges, endpoints::BADGES_ITEMS);
        self.get(&url, request, "Badges").await
    }

    // ========================================================================
    // Bible
    // ========================================================================

    /// Bible service configuration
    pub async fn bible_configuration(&self) -> Result<Model> {
        let url = join(&self.config.endpoints.bible, endpoints::BIBLE_CONFIGURATION);
        self.get(&url, RequestConfig::new(), "BibleConfiguration")
            .await
    }

    /// Versions available in a language
    pub async fn bible_versions(&self, language_tag: &str, version_type: VersionType) -> Result<Model> {
        let request = RequestConfig::new()
            .query("language_tag", language_tag)
            .query("type", version_type.as_str());
        let url = join(&self.config.endpoints.bible, endpoints::BIBLE_VERSIONS);
        self.get(&url, request, "BibleVersions").await
    }

    /// One version's metadata
    pub async fn bible_version(&self, version_id: u64) -> Result<Model> {
        let request = RequestConfig::new().query("id", version_id);
        let url = join(&self.config.endpoints.bible, endpoints::BIBLE_VERSION);
        self.get(&url, request, "BibleVersion").await
    }

    /// Chapter content for a USFM reference such as `GEN.1`
    pub async fn bible_chapter(&self, reference: &str, version_id: u64) -> Result<Model> {
        let request = RequestConfig::new()
            .query("id", version_id)
            .query("reference", reference);
        let url = join(&self.config.endpoints.bible, endpoints::BIBLE_CHAPTER);
        self.get(&url, request, "BibleChapter").await
    }

    /// Languages recommended for a country code
    pub async fn recommended_languages(&self, country: &str) -> Result<Model> {
        let request = RequestConfig::new().query("country", country);
        let url = join(
            &self.config.endpoints.bible,
            endpoints::BIBLE_RECOMMENDED_LANGUAGES,
        );
        self.get(&url, request, "RecommendedLanguages").await
    }

    /// Audio recording of a chapter
    pub async fn audio_chapter(&self, reference: &str, version_id: u64) -> Result<Model> {
        let request = RequestConfig::new()
            .query("version_id", version_id)
            .query("reference", reference);
        let url = join(&self.config.endpoints.audio_bible, endpoints::AUDIO_CHAPTER);
        self.get(&url, request, "AudioChapter").await
    }

    /// One audio Bible version's metadata
    pub async fn audio_version(&self, audio_id: u64) -> Result<Model> {
        let request = RequestConfig::new().query("id", audio_id);
        let url = join(&self.config.endpoints.audio_bible, endpoints::AUDIO_VIEW);
        self.get(&url, request, "AudioVersion").await
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// Verse images for a USFM reference
    pub async fn images(&self, reference: &str, language_tag: &str, page: u32) -> Result<Model> {
        let request = RequestConfig::new()
            .query("reference", reference)
            .query("language_tag", language_tag)
            .query("page", page);
        let url = join(&self.config.endpoints.images, endpoints::IMAGES_ITEMS);
        self.get(&url, request, "Images").await
    }

    /// Upload target and signed parameters for a new image
    pub async fn image_upload_url(&self) -> Result<Model> {
        self.require_auth()?;
        let url = join(&self.config.endpoints.images, endpoints::IMAGES_UPLOAD);
        self.get(&url, RequestConfig::new(), "ImageUpload").await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Full-text Bible search
    pub async fn search_bible(
        &self,
        query: &str,
        version_id: Option<u64>,
        book: Option<&str>,
        page: u32,
    ) -> Result<Model> {
        let request = RequestConfig::new()
            .query("query", query)
            .query("page", page)
            .query_opt("version_id", version_id)
            .query_opt("book", book);
        let url = join(&self.config.endpoints.search, endpoints::SEARCH_BIBLE);
        self.get(&url, request, "BibleSearch").await
    }

    /// Reading plan search
    pub async fn search_plans(&self, query: &str, language_tag: &str, page: u32) -> Result<Model> {
        let url = join(&self.config.endpoints.search, endpoints::SEARCH_PLANS);
        self.get(&url, search_request(query, language_tag, page), "PlanSearch")
            .await
    }

    /// User search
    pub async fn search_users(&self, query: &str, language_tag: &str, page: u32) -> Result<Model> {
        let url = join(&self.config.endpoints.search, endpoints::SEARCH_USERS);
        self.get(&url, search_request(query, language_tag, page), "UserSearch")
            .await
    }

    // ========================================================================
    // Videos
    // ========================================================================

    /// Videos available in a language
    pub async fn videos(&self, language_tag: &str) -> Result<Model> {
        let request = RequestConfig::new().query("language_tag", language_tag);
        let url = join(&self.config.endpoints.search, endpoints::SEARCH_VIDEOS);
        self.get(&url, request, "Videos").await
    }

    /// One video's details
    pub async fn video_details(&self, video_id: u64) -> Result<Model> {
        let request = RequestConfig::new().query("id", video_id);
        let url = join(&self.config.endpoints.videos, endpoints::VIDEOS_VIEW);
        self.get(&url, request, "Video").await
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Event search, optionally near a location
    pub async fn search_events(
        &self,
        query: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        page: u32,
    ) -> Result<Model> {
        let request = RequestConfig::new()
            .query("query", query)
            .query("page", page)
            .query_opt("latitude", latitude)
            .query_opt("longitude", longitude);
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_SEARCH);
        self.get(&url, request, "EventSearch").await
    }

    /// One event's details
    pub async fn event_details(&self, event_id: u64) -> Result<Model> {
        let request = RequestConfig::new().query("id", event_id);
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_VIEW);
        self.get(&url, request, "Event").await
    }

    /// Events saved by the account
    pub async fn saved_events(&self, page: u32) -> Result<Model> {
        self.require_auth()?;
        let request = RequestConfig::new().query("page", page);
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_SAVED_ITEMS);
        self.get(&url, request, "SavedEvents").await
    }

    /// Ids of every event saved by the account
    pub async fn saved_event_ids(&self) -> Result<Model> {
        self.require_auth()?;
        let url = join(
            &self.config.endpoints.events,
            endpoints::EVENTS_SAVED_ALL_ITEMS,
        );
        self.get(&url, RequestConfig::new(), "SavedEventIds").await
    }

    /// Save an event, with optional caller-built comments
    pub async fn save_event(&self, event_id: u64, comments: Option<JsonValue>) -> Result<Model> {
        self.require_auth()?;
        let mut body = json!({ "id": event_id });
        if let Some(comments) = comments {
            body["comments"] = comments;
        }
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_SAVE);
        self.post(&url, body, "SavedEvent").await
    }

    /// Remove an event from the account's saved events
    pub async fn delete_saved_event(&self, event_id: u64) -> Result<Model> {
        self.require_auth()?;
        let request = RequestConfig::new().query("id", event_id);
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_DELETE_SAVED);
        let data = self.http.post_json(&url, request).await?;
        self.materialize(&data, "DeletedSavedEvent")
    }

    /// Events service configuration
    pub async fn event_configuration(&self) -> Result<Model> {
        let url = join(&self.config.endpoints.events, endpoints::EVENTS_CONFIGURATION);
        self.get(&url, RequestConfig::new(), "EventConfiguration")
            .await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn require_auth(&self) -> Result<&crate::auth::Authenticator> {
        self.http
            .authenticator()
            .ok_or_else(|| Error::missing_field("credentials"))
    }

    async fn get(&self, url: &str, request: RequestConfig, context: &str) -> Result<Model> {
        let data = self.http.get_json(url, request).await?;
        self.materialize(&data, context)
    }

    async fn post(&self, url: &str, body: JsonValue, context: &str) -> Result<Model> {
        let data = self.http.post_json(url, RequestConfig::new().json(body)).await?;
        self.materialize(&data, context)
    }
}

fn search_request(query: &str, language_tag: &str, page: u32) -> RequestConfig {
    RequestConfig::new()
        .query("query", query)
        .query("language_tag", language_tag)
        .query("page", page)
}
