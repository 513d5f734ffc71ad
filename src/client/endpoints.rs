//! Endpoint paths, relative to the service base URLs in [`crate::config::Endpoints`]

// Moments service
pub const MOMENTS_ITEMS: &str = "/3.1/items.json";
pub const MOMENTS_VIEW: &str = "/3.1/view.json";
pub const MOMENTS_CREATE: &str = "/3.1/create.json";
pub const MOMENTS_UPDATE: &str = "/3.1/update.json";
pub const MOMENTS_DELETE: &str = "/3.1/delete.json";
pub const MOMENTS_COLORS: &str = "/3.1/colors.json";
pub const MOMENTS_LABELS: &str = "/3.1/labels.json";
pub const MOMENTS_VERSE_COLORS: &str = "/3.1/verse_colors.json";
pub const MOMENTS_HIDE_VERSE_COLORS: &str = "/3.1/hide_verse_colors.json";
pub const MOMENTS_CONFIGURATION: &str = "/3.1/configuration.json";
pub const COMMENTS_CREATE: &str = "/3.1/comments/create.json";
pub const COMMENTS_DELETE: &str = "/3.1/comments/delete.json";
pub const LIKES_CREATE: &str = "/3.1/likes/create.json";
pub const LIKES_DELETE: &str = "/3.1/likes/delete.json";
pub const MESSAGING_REGISTER: &str = "/3.1/messaging/register.json";
pub const MESSAGING_UNREGISTER: &str = "/3.1/messaging/unregister.json";
pub const LOCALIZATION_ITEMS: &str = "/3.1/localization/items.po";

// Bible service
pub const BIBLE_CONFIGURATION: &str = "/3.1/configuration.json";
pub const BIBLE_VERSIONS: &str = "/3.1/versions.json";
pub const BIBLE_VERSION: &str = "/3.1/version.json";
pub const BIBLE_CHAPTER: &str = "/3.1/chapter.json";
pub const BIBLE_RECOMMENDED_LANGUAGES: &str = "/3.1/recommended_languages.json";

// Audio Bible service
pub const AUDIO_CHAPTER: &str = "/3.1/chapter.json";
pub const AUDIO_VIEW: &str = "/3.1/view.json";

// Search service (also lists videos)
pub const SEARCH_BIBLE: &str = "/3.1/bible.json";
pub const SEARCH_PLANS: &str = "/3.1/plans.json";
pub const SEARCH_USERS: &str = "/3.1/users.json";
pub const SEARCH_VIDEOS: &str = "/3.1/videos.json";

// Videos service
pub const VIDEOS_VIEW: &str = "/3.1/view.json";

// Badges service
pub const BADGES_ITEMS: &str = "/3.1/items.json";

// Images service
pub const IMAGES_ITEMS: &str = "/3.1/items.json";
pub const IMAGES_UPLOAD: &str = "/3.1/upload.json";

// Themes service
pub const THEMES_ITEMS: &str = "/3.1/items.json";
pub const THEMES_ADD: &str = "/3.1/create.json";
pub const THEMES_REMOVE: &str = "/3.1/remove.json";
pub const THEMES_SET: &str = "/3.1/set.json";
pub const THEMES_DESCRIPTION: &str = "/3.1/description.json";

// Friendships service
pub const FRIENDSHIPS_OFFER: &str = "/3.1/offer.json";

// Events service
pub const EVENTS_SEARCH: &str = "/3.2/search.json";
pub const EVENTS_VIEW: &str = "/3.2/view.json";
pub const EVENTS_SAVED_ITEMS: &str = "/3.2/saved_items.json";
pub const EVENTS_SAVED_ALL_ITEMS: &str = "/3.2/saved_all_items.json";
pub const EVENTS_SAVE: &str = "/3.2/save.json";
pub const EVENTS_DELETE_SAVED: &str = "/3.2/delete_saved.json";
pub const EVENTS_CONFIGURATION: &str = "/3.2/configuration.json";

/// Join a service base URL and an endpoint path
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod endpoint_tests {
    use super::*;

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(
            join("https://bible.youversionapi.com/", BIBLE_VERSIONS),
            "https://bible.youversionapi.com/3.1/versions.json"
        );
        assert_eq!(
            join("http://127.0.0.1:8080", EVENTS_VIEW),
            "http://127.0.0.1:8080/3.2/view.json"
        );
    }
}
