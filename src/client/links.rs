//! Moment link normalization
//!
//! Moment payloads carry protocol-relative image URLs (`//images...`) and
//! site-relative paths (`/users/ruth/moments/1`). Both are made absolute
//! before materialization.

use crate::types::JsonValue;
use serde_json::Map;

/// Fields holding protocol-relative image URLs
const IMAGE_FIELDS: &[&str] = &["avatar", "friend_avatar", "body_image"];

/// Fields holding paths on the website
const PATH_FIELDS: &[&str] = &["path", "friend_path", "action_url"];

/// Rewrite the link fields of a moment, or of every moment in a list, in place
pub(crate) fn normalize_moment_links(moments: &mut JsonValue, web_base: &str) {
    match moments {
        JsonValue::Array(items) => {
            for item in items {
                normalize_moment_links(item, web_base);
            }
        }
        JsonValue::Object(moment) => normalize_fields(moment, web_base),
        _ => {}
    }
}

fn normalize_fields(moment: &mut Map<String, JsonValue>, web_base: &str) {
    let base = web_base.trim_end_matches('/');

    for field in IMAGE_FIELDS {
        if let Some(JsonValue::String(url)) = moment.get_mut(*field) {
            if url.starts_with("//") {
                url.insert_str(0, "https:");
            }
        }
    }

    for field in PATH_FIELDS {
        if let Some(JsonValue::String(path)) = moment.get_mut(*field) {
            if path.starts_with('/') && !path.starts_with("//") {
                path.insert_str(0, base);
            }
        }
    }
}

#[cfg(test)]
mod link_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_moment_links_are_made_absolute() {
        let mut moments = json!([
            {
                "id": 1,
                "avatar": "//images.youversionapi.com/ruth.jpg",
                "path": "/users/ruth/moments/1",
                "action_url": "/reading-plans/12/day/3"
            },
            {
                "id": 2,
                "avatar": "https://images.youversionapi.com/naomi.jpg",
                "path": "https://my.bible.com/users/naomi/moments/2",
                "friend_avatar": "//images.youversionapi.com/boaz.jpg",
                "friend_path": "/users/boaz"
            }
        ]);

        normalize_moment_links(&mut moments, "https://my.bible.com/");

        assert_eq!(
            moments,
            json!([
                {
                    "id": 1,
                    "avatar": "https://images.youversionapi.com/ruth.jpg",
                    "path": "https://my.bible.com/users/ruth/moments/1",
                    "action_url": "https://my.bible.com/reading-plans/12/day/3"
                },
                {
                    "id": 2,
                    "avatar": "https://images.youversionapi.com/naomi.jpg",
                    "path": "https://my.bible.com/users/naomi/moments/2",
                    "friend_avatar": "https://images.youversionapi.com/boaz.jpg",
                    "friend_path": "https://my.bible.com/users/boaz"
                }
            ])
        );
    }

    #[test]
    fn test_non_string_links_are_left_alone() {
        let mut moment = json!({"avatar": null, "path": 7, "body_image": "//img/1.jpg"});

        normalize_moment_links(&mut moment, "https://my.bible.com");

        assert_eq!(
            moment,
            json!({"avatar": null, "path": 7, "body_image": "https://img/1.jpg"})
        );
    }
}
