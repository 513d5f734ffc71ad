//! Blocking API client
//!
//! Wraps the async [`Client`](super::Client) in a private current-thread
//! runtime. It must not be created from within an async runtime.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::{Materializer, Model};
use crate::types::{JsonValue, MomentQuery, VersionType};
use tokio::runtime::{Builder, Handle, Runtime};

/// Blocking YouVersion API client
#[derive(Debug)]
pub struct Client {
    inner: super::Client,
    runtime: Runtime,
}

impl Client {
    /// Create a blocking client
    ///
    /// Fails with [`Error::Runtime`] when called from inside a tokio runtime.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if Handle::try_current().is_ok() {
            return Err(Error::runtime(
                "The blocking client cannot be used inside an async runtime; use youversion::Client",
            ));
        }

        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = super::Client::new(config)?;
        Ok(Self { inner, runtime })
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// The materializer holding this client's type cache
    pub fn materializer(&self) -> &Materializer {
        self.inner.materializer()
    }

    /// See [`super::Client::authenticate`]
    pub fn authenticate(&self) -> Result<()> {
        self.runtime.block_on(self.inner.authenticate())
    }

    /// See [`super::Client::user_id`]
    pub fn user_id(&self) -> Result<Option<u64>> {
        self.runtime.block_on(self.inner.user_id())
    }

    /// See [`super::Client::materialize`]
    pub fn materialize(&self, value: &JsonValue, context: &str) -> Result<Model> {
        self.inner.materialize(value, context)
    }

    /// See [`super::Client::close`]
    pub fn close(&self) {
        self.runtime.block_on(self.inner.close());
    }

    /// See [`super::Client::verses_of_the_day`]
    pub fn verses_of_the_day(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.verses_of_the_day())
    }

    /// See [`super::Client::verse_of_the_day`]
    pub fn verse_of_the_day(&self, day: Option<u32>) -> Result<Model> {
        self.runtime.block_on(self.inner.verse_of_the_day(day))
    }

    /// See [`super::Client::moments`]
    pub fn moments(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.moments(page))
    }

    /// See [`super::Client::highlights`]
    pub fn highlights(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.highlights(page))
    }

    /// See [`super::Client::notes`]
    pub fn notes(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.notes(page))
    }

    /// See [`super::Client::bookmarks`]
    pub fn bookmarks(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.bookmarks(page))
    }

    /// See [`super::Client::my_images`]
    pub fn my_images(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.my_images(page))
    }

    /// See [`super::Client::plan_progress`]
    pub fn plan_progress(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.plan_progress(page))
    }

    /// See [`super::Client::plan_subscriptions`]
    pub fn plan_subscriptions(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.plan_subscriptions(page))
    }

    /// See [`super::Client::plan_completions`]
    pub fn plan_completions(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.plan_completions(page))
    }

    /// See [`super::Client::query_moments`]
    pub fn query_moments(&self, query: &MomentQuery) -> Result<Model> {
        self.runtime.block_on(self.inner.query_moments(query))
    }

    /// See [`super::Client::moment_details`]
    pub fn moment_details(&self, moment_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.moment_details(moment_id))
    }

    /// See [`super::Client::create_moment`]
    pub fn create_moment(&self, moment: JsonValue) -> Result<Model> {
        self.runtime.block_on(self.inner.create_moment(moment))
    }

    /// See [`super::Client::update_moment`]
    pub fn update_moment(&self, moment: JsonValue) -> Result<Model> {
        self.runtime.block_on(self.inner.update_moment(moment))
    }

    /// See [`super::Client::moment_colors`]
    pub fn moment_colors(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.moment_colors())
    }

    /// See [`super::Client::moment_labels`]
    pub fn moment_labels(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.moment_labels())
    }

    /// See [`super::Client::verse_colors`]
    pub fn verse_colors(&self, usfm: &str, version_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.verse_colors(usfm, version_id))
    }

    /// See [`super::Client::hide_verse_colors`]
    pub fn hide_verse_colors(&self, colors: JsonValue) -> Result<Model> {
        self.runtime.block_on(self.inner.hide_verse_colors(colors))
    }

    /// See [`super::Client::moments_configuration`]
    pub fn moments_configuration(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.moments_configuration())
    }

    /// See [`super::Client::create_comment`]
    pub fn create_comment(&self, moment_id: u64, comment: &str) -> Result<Model> {
        self.runtime.block_on(self.inner.create_comment(moment_id, comment))
    }

    /// See [`super::Client::delete_comment`]
    pub fn delete_comment(&self, comment_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.delete_comment(comment_id))
    }

    /// See [`super::Client::like_moment`]
    pub fn like_moment(&self, moment_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.like_moment(moment_id))
    }

    /// See [`super::Client::unlike_moment`]
    pub fn unlike_moment(&self, moment_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.unlike_moment(moment_id))
    }

    /// See [`super::Client::delete_moment`]
    pub fn delete_moment(&self, moment_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.delete_moment(moment_id))
    }

    /// See [`super::Client::register_device`]
    pub fn register_device(
        &self,
        device_id: &str,
        device_type: &str,
        previous_device_id: Option<&str>,
        tags: Option<&str>,
    ) -> Result<Model> {
        self.runtime
            .block_on(self.inner.register_device(device_id, device_type, previous_device_id, tags))
    }

    /// See [`super::Client::unregister_device`]
    pub fn unregister_device(&self, device_id: &str) -> Result<Model> {
        self.runtime.block_on(self.inner.unregister_device(device_id))
    }

    /// See [`super::Client::localization_items`]
    pub fn localization_items(&self, language_tag: &str) -> Result<String> {
        self.runtime.block_on(self.inner.localization_items(language_tag))
    }

    /// See [`super::Client::themes`]
    pub fn themes(&self, language_tag: &str, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.themes(language_tag, page))
    }

    /// See [`super::Client::add_theme`]
    pub fn add_theme(&self, theme_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.add_theme(theme_id))
    }

    /// See [`super::Client::remove_theme`]
    pub fn remove_theme(&self, theme_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.remove_theme(theme_id))
    }

    /// See [`super::Client::set_theme`]
    pub fn set_theme(&self, theme_id: u64, previous_theme_id: Option<u64>) -> Result<Model> {
        self.runtime.block_on(self.inner.set_theme(theme_id, previous_theme_id))
    }

    /// See [`super::Client::theme_description`]
    pub fn theme_description(&self, theme_id: u64, language_tag: &str) -> Result<Model> {
        self.runtime.block_on(self.inner.theme_description(theme_id, language_tag))
    }

    /// See [`super::Client::send_friend_request`]
    pub fn send_friend_request(&self, user_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.send_friend_request(user_id))
    }

    /// See [`super::Client::badges`]
    pub fn badges(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.badges(page))
    }

    /// See [`super::Client::bible_configuration`]
    pub fn bible_configuration(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.bible_configuration())
    }

    /// See [`super::Client::bible_versions`]
    pub fn bible_versions(&self, language_tag: &str, version_type: VersionType) -> Result<Model> {
        self.runtime.block_on(self.inner.bible_versions(language_tag, version_type))
    }

    /// See [`super::Client::bible_version`]
    pub fn bible_version(&self, version_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.bible_version(version_id))
    }

    /// See [`super::Client::bible_chapter`]
    pub fn bible_chapter(&self, reference: &str, version_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.bible_chapter(reference, version_id))
    }

    /// See [`super::Client::recommended_languages`]
    pub fn recommended_languages(&self, country: &str) -> Result<Model> {
        self.runtime.block_on(self.inner.recommended_languages(country))
    }

    /// See [`super::Client::audio_chapter`]
    pub fn audio_chapter(&self, reference: &str, version_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.audio_chapter(reference, version_id))
    }

    /// See [`super::Client::audio_version`]
    pub fn audio_version(&self, audio_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.audio_version(audio_id))
    }

    /// See [`super::Client::images`]
    pub fn images(&self, reference: &str, language_tag: &str, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.images(reference, language_tag, page))
    }

    /// See [`super::Client::image_upload_url`]
    pub fn image_upload_url(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.image_upload_url())
    }

    /// See [`super::Client::search_bible`]
    pub fn search_bible(
        &self,
        query: &str,
        version_id: Option<u64>,
        book: Option<&str>,
        page: u32,
    ) -> Result<Model> {
        self.runtime.block_on(self.inner.search_bible(query, version_id, book, page))
    }

    /// See [`super::Client::search_plans`]
    pub fn search_plans(&self, query: &str, language_tag: &str, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.search_plans(query, language_tag, page))
    }

    /// See [`super::Client::search_users`]
    pub fn search_users(&self, query: &str, language_tag: &str, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.search_users(query, language_tag, page))
    }

    /// See [`super::Client::videos`]
    pub fn videos(&self, language_tag: &str) -> Result<Model> {
        self.runtime.block_on(self.inner.videos(language_tag))
    }

    /// See [`super::Client::video_details`]
    pub fn video_details(&self, video_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.video_details(video_id))
    }

    /// See [`super::Client::search_events`]
    pub fn search_events(
        &self,
        query: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        page: u32,
    ) -> Result<Model> {
        self.runtime.block_on(self.inner.search_events(query, latitude, longitude, page))
    }

    /// See [`super::Client::event_details`]
    pub fn event_details(&self, event_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.event_details(event_id))
    }

    /// See [`super::Client::saved_events`]
    pub fn saved_events(&self, page: u32) -> Result<Model> {
        self.runtime.block_on(self.inner.saved_events(page))
    }

    /// See [`super::Client::saved_event_ids`]
    pub fn saved_event_ids(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.saved_event_ids())
    }

    /// See [`super::Client::save_event`]
    pub fn save_event(&self, event_id: u64, comments: Option<JsonValue>) -> Result<Model> {
        self.runtime.block_on(self.inner.save_event(event_id, comments))
    }

    /// See [`super::Client::delete_saved_event`]
    pub fn delete_saved_event(&self, event_id: u64) -> Result<Model> {
        self.runtime.block_on(self.inner.delete_saved_event(event_id))
    }

    /// See [`super::Client::event_configuration`]
    pub fn event_configuration(&self) -> Result<Model> {
        self.runtime.block_on(self.inner.event_configuration())
    }
}
