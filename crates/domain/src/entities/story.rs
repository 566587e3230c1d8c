//! Story entity - an ephemeral, view-once media item
//!
//! Stories are owned by the story repository. The sequencer reads them and
//! asks the repository to flip `viewed` as playback moves past each one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::value_objects::ImageFilter;
use crate::StoryId;

/// A story posted by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub author: UserRef,
    /// Media reference (URL or data URI)
    pub image: String,
    #[serde(default)]
    pub filter: ImageFilter,
    #[serde(default)]
    pub viewed: bool,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Create a new, unviewed story
    pub fn new(author: UserRef, image: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: StoryId::new(),
            author,
            image: image.into(),
            filter: ImageFilter::None,
            viewed: false,
            created_at,
        }
    }

    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Mark as viewed. Returns `true` if this call changed the flag.
    pub fn mark_viewed(&mut self) -> bool {
        let changed = !self.viewed;
        self.viewed = true;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Username;
    use crate::UserId;
    use chrono::TimeZone;

    #[test]
    fn mark_viewed_is_idempotent() {
        let author = UserRef {
            id: UserId::new(),
            username: Username::new("ana").unwrap(),
            avatar: None,
        };
        let mut story = Story::new(
            author,
            "https://img.example/1.jpg",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        assert!(!story.viewed);
        assert!(story.mark_viewed());
        assert!(!story.mark_viewed());
        assert!(story.viewed);
    }
}
