//! Repository port traits for data access.
//!
//! One trait per record type, shaped after the client-side services they
//! replace: `list`, `get`, `create`, `update`, `delete`, plus the few queries
//! the use cases need. `update` and `delete` fail with `NotFound` when the
//! record is absent; `delete` hands back the removed record.

use async_trait::async_trait;
use glimpse_domain::{
    Activity, ActivityId, Conversation, ConversationId, Message, MessageId, Post, PostId, Story,
    StoryId, User, UserId,
};

use super::error::RepoError;

// =============================================================================
// Stories
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryRepo: Send + Sync {
    /// All stories in insertion order
    async fn list(&self) -> Result<Vec<Story>, RepoError>;
    async fn get(&self, id: StoryId) -> Result<Option<Story>, RepoError>;
    async fn create(&self, story: &Story) -> Result<(), RepoError>;
    async fn update(&self, story: &Story) -> Result<(), RepoError>;
    async fn delete(&self, id: StoryId) -> Result<Story, RepoError>;

    /// Set `viewed = true`. Idempotent; returns the stored story.
    async fn mark_viewed(&self, id: StoryId) -> Result<Story, RepoError>;

    /// Most recently created story by `author`
    async fn latest_by_author(&self, author: UserId) -> Result<Option<Story>, RepoError>;
}

// =============================================================================
// Feed
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Post>, RepoError>;
    async fn get(&self, id: PostId) -> Result<Option<Post>, RepoError>;
    /// New posts go to the front of the feed
    async fn create(&self, post: &Post) -> Result<(), RepoError>;
    async fn update(&self, post: &Post) -> Result<(), RepoError>;
    async fn delete(&self, id: PostId) -> Result<Post, RepoError>;

    /// Posts by `author`, newest first
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>, RepoError>;
}

// =============================================================================
// People
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, RepoError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    /// Case-insensitive username lookup
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
    async fn create(&self, user: &User) -> Result<(), RepoError>;
    async fn update(&self, user: &User) -> Result<(), RepoError>;
    async fn delete(&self, id: UserId) -> Result<User, RepoError>;
}

// =============================================================================
// Notifications
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepo: Send + Sync {
    /// All activities, newest first
    async fn list(&self) -> Result<Vec<Activity>, RepoError>;
    async fn get(&self, id: ActivityId) -> Result<Option<Activity>, RepoError>;
    async fn create(&self, activity: &Activity) -> Result<(), RepoError>;
    async fn update(&self, activity: &Activity) -> Result<(), RepoError>;
    async fn delete(&self, id: ActivityId) -> Result<Activity, RepoError>;
}

// =============================================================================
// Direct messages
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepo: Send + Sync {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepoError>;
    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepoError>;
    async fn update_conversation(&self, conversation: &Conversation) -> Result<(), RepoError>;

    /// Messages of one conversation, oldest first
    async fn list_messages(&self, conversation: ConversationId)
        -> Result<Vec<Message>, RepoError>;
    async fn create_message(&self, message: &Message) -> Result<(), RepoError>;
    /// Set `read = true`; returns the stored message
    async fn mark_read(&self, id: MessageId) -> Result<Message, RepoError>;
    async fn delete_message(&self, id: MessageId) -> Result<Message, RepoError>;
}
