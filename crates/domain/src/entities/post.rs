//! Post entity - feed items with likes and comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::events::LikeChange;
use crate::value_objects::{Caption, CommentText, ImageFilter};
use crate::{CommentId, PostId, UserId};

/// Number of comments shown under a post before "View all"
pub const COMMENT_PREVIEW_LIMIT: usize = 3;

/// A feed post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author: UserRef,
    pub images: Vec<String>,
    pub caption: Caption,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub filter: ImageFilter,
    /// Users who liked the post, in the order they liked it
    #[serde(default)]
    pub likes: Vec<UserId>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with a single image and no engagement yet
    pub fn new(
        author: UserRef,
        image: impl Into<String>,
        caption: Caption,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PostId::new(),
            author,
            images: vec![image.into()],
            caption,
            location: None,
            filter: ImageFilter::None,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at,
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// First image, or a placeholder seeded by the post id
    pub fn cover_image(&self) -> String {
        self.images
            .first()
            .cloned()
            .unwrap_or_else(|| format!("https://picsum.photos/600/600?random={}", self.id))
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.likes.contains(&user_id)
    }

    /// Like if not yet liked by `user_id`, otherwise remove the like
    pub fn toggle_like(&mut self, user_id: UserId) -> LikeChange {
        if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            LikeChange::Unliked {
                likes: self.likes.len(),
            }
        } else {
            self.likes.push(user_id);
            LikeChange::Liked {
                likes: self.likes.len(),
            }
        }
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Comments shown inline under the post
    pub fn comment_preview(&self) -> &[Comment] {
        let end = self.comments.len().min(COMMENT_PREVIEW_LIMIT);
        &self.comments[..end]
    }
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: UserRef,
    pub text: CommentText,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: UserRef, text: CommentText, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new(),
            author,
            text,
            created_at,
        }
    }
}
