//! Activity use cases: the notification feed, its tabs and the dropdown digest.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use glimpse_domain::common::time_ago;
use glimpse_domain::{Activity, ActivityId, ActivityKind, ActivityTab};

use crate::infrastructure::ports::{ActivityRepo, ClockPort, RepoError};

/// Activities considered by the dropdown digest
pub const DIGEST_RECENT_LIMIT: usize = 5;
/// Rows shown per group in the digest
pub const DIGEST_GROUP_LIMIT: usize = 3;
/// Unread counts above this render as "99+"
const BADGE_LIMIT: usize = 99;

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found: {0}")]
    NotFound(ActivityId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// An activity ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub icon: &'static str,
    pub accent: &'static str,
    pub text: String,
    pub time_ago: String,
    pub read: bool,
    pub post_image: Option<String>,
    pub offers_follow_back: bool,
}

impl ActivityView {
    pub fn new(activity: &Activity, now: DateTime<Utc>) -> Self {
        Self::build(activity, now, activity.summary())
    }

    /// Dropdown row: the text is cut to a fixed length.
    pub fn compact(activity: &Activity, now: DateTime<Utc>) -> Self {
        Self::build(activity, now, activity.compact_summary())
    }

    fn build(activity: &Activity, now: DateTime<Utc>, text: String) -> Self {
        let descriptor = activity.descriptor();
        Self {
            id: activity.id,
            kind: activity.kind,
            icon: descriptor.icon,
            accent: descriptor.accent,
            text,
            time_ago: time_ago(activity.created_at, now),
            read: activity.read,
            post_image: activity.post_image.clone(),
            offers_follow_back: descriptor.offers_follow_back,
        }
    }
}

/// One kind's block in the dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationGroup {
    pub kind: ActivityKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: Vec<ActivityView>,
    /// Activities of this kind among the recent ones, shown or not
    pub total: usize,
}

impl NotificationGroup {
    /// Count for the "+N more" line
    pub fn hidden(&self) -> usize {
        self.total.saturating_sub(self.items.len())
    }
}

/// What the notification bell shows
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDigest {
    pub unread_count: usize,
    /// Groups in order of their newest activity
    pub groups: Vec<NotificationGroup>,
}

impl NotificationDigest {
    /// Badge text, `None` when nothing is unread
    pub fn badge(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > BADGE_LIMIT => Some(format!("{}+", BADGE_LIMIT)),
            n => Some(n.to_string()),
        }
    }
}

/// Activity operations.
pub struct ActivityOps {
    activities: Arc<dyn ActivityRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ActivityOps {
    pub fn new(activities: Arc<dyn ActivityRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { activities, clock }
    }

    /// Activities on `tab`, newest first.
    pub async fn list(&self, tab: ActivityTab) -> Result<Vec<Activity>, ActivityError> {
        let mut activities = self.activities.list().await?;
        activities.retain(|activity| tab.matches(activity));
        Ok(activities)
    }

    pub async fn views(&self, tab: ActivityTab) -> Result<Vec<ActivityView>, ActivityError> {
        let now = self.clock.now();
        Ok(self
            .list(tab)
            .await?
            .iter()
            .map(|activity| ActivityView::new(activity, now))
            .collect())
    }

    pub async fn unread_count(&self) -> Result<usize, ActivityError> {
        let activities = self.activities.list().await?;
        Ok(activities.iter().filter(|activity| !activity.read).count())
    }

    pub async fn mark_read(&self, id: ActivityId) -> Result<Activity, ActivityError> {
        let mut activity = self
            .activities
            .get(id)
            .await?
            .ok_or(ActivityError::NotFound(id))?;
        if activity.mark_read() {
            self.activities.update(&activity).await?;
        }
        Ok(activity)
    }

    /// Mark everything read; returns how many changed.
    pub async fn mark_all_read(&self) -> Result<usize, ActivityError> {
        let mut changed = 0;
        for mut activity in self.activities.list().await? {
            if activity.mark_read() {
                self.activities.update(&activity).await?;
                changed += 1;
            }
        }
        tracing::debug!(changed, "Marked all activity read");
        Ok(changed)
    }

    /// Recent activity grouped by kind for the notification dropdown.
    pub async fn digest(&self) -> Result<NotificationDigest, ActivityError> {
        let now = self.clock.now();
        let activities = self.activities.list().await?;
        let unread_count = activities.iter().filter(|activity| !activity.read).count();

        let mut groups: Vec<NotificationGroup> = Vec::new();
        for activity in activities.iter().take(DIGEST_RECENT_LIMIT) {
            let index = match groups.iter().position(|g| g.kind == activity.kind) {
                Some(index) => index,
                None => {
                    let descriptor = activity.descriptor();
                    groups.push(NotificationGroup {
                        kind: activity.kind,
                        label: descriptor.group_label,
                        icon: descriptor.icon,
                        items: Vec::new(),
                        total: 0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            group.total += 1;
            if group.items.len() < DIGEST_GROUP_LIMIT {
                group.items.push(ActivityView::compact(activity, now));
            }
        }

        Ok(NotificationDigest {
            unread_count,
            groups,
        })
    }
}
