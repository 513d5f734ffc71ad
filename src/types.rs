//! Common types used throughout the client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Moment Kinds
// ============================================================================

/// Kind filter for the moments feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    Friendship,
    Highlight,
    Image,
    Note,
    PlanCompletion,
    PlanSegmentCompletion,
    PlanSubscription,
    Bookmark,
}

impl MomentKind {
    /// Wire value used in the `kind` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            MomentKind::Friendship => "friendship",
            MomentKind::Highlight => "highlight",
            MomentKind::Image => "image",
            MomentKind::Note => "note",
            MomentKind::PlanCompletion => "plan_completion",
            MomentKind::PlanSegmentCompletion => "plan_segment_completion",
            MomentKind::PlanSubscription => "plan_subscription",
            MomentKind::Bookmark => "bookmark",
        }
    }

    /// Naming context used for the records of this kind
    pub fn context(self) -> &'static str {
        match self {
            MomentKind::Friendship => "Friendships",
            MomentKind::Highlight => "Highlights",
            MomentKind::Image => "Images",
            MomentKind::Note => "Notes",
            MomentKind::PlanCompletion => "PlanCompletions",
            MomentKind::PlanSegmentCompletion => "PlanSegmentCompletions",
            MomentKind::PlanSubscription => "PlanSubscriptions",
            MomentKind::Bookmark => "Bookmarks",
        }
    }
}

impl std::fmt::Display for MomentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Bible Version Type
// ============================================================================

/// Which Bible versions to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    #[default]
    All,
    Text,
    Audio,
}

impl VersionType {
    /// Wire value used in the `type` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            VersionType::All => "all",
            VersionType::Text => "text",
            VersionType::Audio => "audio",
        }
    }
}

// ============================================================================
// Moment Queries
// ============================================================================

/// Filters for one page of the moments feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentQuery {
    /// Page number, starting at 1
    pub page: u32,
    /// Restrict to one kind of moment
    pub kind: Option<MomentKind>,
    /// Whose moments to list (the signed-in account when `None`)
    pub user_id: Option<u64>,
    /// Restrict to moments on this Bible version
    pub version_id: Option<u64>,
    /// Restrict to moments on this USFM reference
    pub usfm: Option<String>,
}

impl Default for MomentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            kind: None,
            user_id: None,
            version_id: None,
            usfm: None,
        }
    }
}

impl MomentQuery {
    /// First page, no filters
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: MomentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn version_id(mut self, version_id: u64) -> Self {
        self.version_id = Some(version_id);
        self
    }

    #[must_use]
    pub fn usfm(mut self, usfm: impl Into<String>) -> Self {
        self.usfm = Some(usfm.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_kind_wire_values() {
        assert_eq!(MomentKind::Highlight.as_str(), "highlight");
        assert_eq!(
            MomentKind::PlanSegmentCompletion.to_string(),
            "plan_segment_completion"
        );
        let kind: MomentKind = serde_json::from_str("\"plan_subscription\"").unwrap();
        assert_eq!(kind, MomentKind::PlanSubscription);
    }

    #[test]
    fn test_version_type_default() {
        assert_eq!(VersionType::default(), VersionType::All);
        assert_eq!(VersionType::Audio.as_str(), "audio");
    }

    #[test]
    fn test_moment_query_builder() {
        let query = MomentQuery::new()
            .page(3)
            .kind(MomentKind::Note)
            .version_id(111)
            .usfm("JHN.3.16");

        assert_eq!(query.page, 3);
        assert_eq!(query.kind, Some(MomentKind::Note));
        assert_eq!(query.user_id, None);
        assert_eq!(query.version_id, Some(111));
        assert_eq!(query.usfm.as_deref(), Some("JHN.3.16"));
        assert_eq!(MomentQuery::default().page, 1);
    }
}
