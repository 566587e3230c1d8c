//! Activity entity - notifications about likes, comments, follows and mentions
//!
//! Presentation is table driven: every `ActivityKind` maps to a static
//! `ActivityDescriptor` instead of being switched on at each call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::common::truncate_with_ellipsis;
use crate::ActivityId;

/// Compact rows (dropdowns) cut the summary to this many characters
pub const COMPACT_SUMMARY_LIMIT: usize = 60;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Like,
    Comment,
    Follow,
    Mention,
    /// Forward-compatibility fallback for kinds this build does not know.
    #[serde(other)]
    Other,
}

/// Static presentation data for an activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityDescriptor {
    pub kind: ActivityKind,
    /// Icon name in the shared icon set
    pub icon: &'static str,
    /// Badge background colour
    pub accent: &'static str,
    /// Tab label
    pub label: &'static str,
    /// Heading for this kind's group in the notification dropdown
    pub group_label: &'static str,
    /// Whether the row offers a "Follow Back" action
    pub offers_follow_back: bool,
}

// Indexed by `ActivityKind as usize`; order must match the enum.
static ACTIVITY_DESCRIPTORS: [ActivityDescriptor; 5] = [
    ActivityDescriptor {
        kind: ActivityKind::Like,
        icon: "Heart",
        accent: "bg-red-500",
        label: "Likes",
        group_label: "Likes",
        offers_follow_back: false,
    },
    ActivityDescriptor {
        kind: ActivityKind::Comment,
        icon: "MessageCircle",
        accent: "bg-blue-500",
        label: "Comments",
        group_label: "Comments",
        offers_follow_back: false,
    },
    ActivityDescriptor {
        kind: ActivityKind::Follow,
        icon: "UserPlus",
        accent: "bg-green-500",
        label: "Follows",
        group_label: "New Followers",
        offers_follow_back: true,
    },
    ActivityDescriptor {
        kind: ActivityKind::Mention,
        icon: "AtSign",
        accent: "bg-purple-500",
        label: "Mentions",
        group_label: "Mentions",
        offers_follow_back: false,
    },
    ActivityDescriptor {
        kind: ActivityKind::Other,
        icon: "Bell",
        accent: "bg-gray-500",
        label: "Other",
        group_label: "Activity",
        offers_follow_back: false,
    },
];

impl ActivityKind {
    pub fn descriptor(self) -> &'static ActivityDescriptor {
        &ACTIVITY_DESCRIPTORS[self as usize]
    }
}

/// Activity feed filter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityTab {
    #[default]
    All,
    Only(ActivityKind),
}

impl ActivityTab {
    /// Tabs shown on the activity page, in order
    pub const TABS: [ActivityTab; 4] = [
        ActivityTab::All,
        ActivityTab::Only(ActivityKind::Like),
        ActivityTab::Only(ActivityKind::Comment),
        ActivityTab::Only(ActivityKind::Follow),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(kind) => kind.descriptor().label,
        }
    }

    pub fn matches(self, activity: &Activity) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => activity.kind == kind,
        }
    }
}

/// A notification in the current user's activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Who triggered the activity
    pub actor: UserRef,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub post_image: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        kind: ActivityKind,
        actor: UserRef,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            kind,
            actor,
            content: content.into(),
            post_image: None,
            read: false,
            created_at,
        }
    }

    pub fn with_post_image(mut self, image: impl Into<String>) -> Self {
        self.post_image = Some(image.into());
        self
    }

    pub fn descriptor(&self) -> &'static ActivityDescriptor {
        self.kind.descriptor()
    }

    /// One-line sentence describing the activity
    pub fn summary(&self) -> String {
        let who = self.actor.username.as_str();
        match self.kind {
            ActivityKind::Like => format!("{} liked your photo.", who),
            ActivityKind::Comment => format!("{} commented: \"{}\"", who, self.content),
            ActivityKind::Follow => format!("{} started following you.", who),
            ActivityKind::Mention => format!("{} mentioned you in a comment.", who),
            ActivityKind::Other => self.content.clone(),
        }
    }

    /// Summary cut to `COMPACT_SUMMARY_LIMIT` characters for dropdown rows
    pub fn compact_summary(&self) -> String {
        truncate_with_ellipsis(&self.summary(), COMPACT_SUMMARY_LIMIT)
    }

    /// Mark as read. Returns `true` if this call changed the flag.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
