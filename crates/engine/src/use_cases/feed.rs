//! Feed use cases: posts, likes and comments.

use std::sync::Arc;

use glimpse_domain::common::none_if_blank;
use glimpse_domain::{
    Caption, Comment, CommentText, DomainError, ImageFilter, LikeChange, Post, PostId, UserId,
};

use super::current_user::CurrentUser;
use crate::infrastructure::ports::{ClockPort, PostRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Post not found: {0}")]
    NotFound(PostId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Input for a new post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    /// Media reference (URL or data URI)
    pub image: String,
    pub caption: String,
    pub location: String,
    pub filter: ImageFilter,
}

/// Post operations.
pub struct FeedOps {
    posts: Arc<dyn PostRepo>,
    current_user: Arc<CurrentUser>,
    clock: Arc<dyn ClockPort>,
}

impl FeedOps {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        current_user: Arc<CurrentUser>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            posts,
            current_user,
            clock,
        }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, FeedError> {
        Ok(self.posts.list().await?)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, FeedError> {
        self.posts.get(id).await?.ok_or(FeedError::NotFound(id))
    }

    pub async fn by_author(&self, author: UserId) -> Result<Vec<Post>, FeedError> {
        Ok(self.posts.list_by_author(author).await?)
    }

    /// Publish a post as the current user. Needs an image and a caption.
    pub async fn create(&self, input: NewPost) -> Result<Post, FeedError> {
        let image = none_if_blank(&input.image)
            .ok_or_else(|| DomainError::validation("Please select an image and add a caption"))?;
        let caption = Caption::new(input.caption)?;
        let author = self.current_user.get().await?;

        let post = Post::new(author.to_ref(), image, caption, self.clock.now())
            .with_location(none_if_blank(&input.location))
            .with_filter(input.filter);
        self.posts.create(&post).await?;
        tracing::info!(post_id = %post.id, author = %author.username, "Post created");
        Ok(post)
    }

    /// Like or unlike as the current user.
    pub async fn toggle_like(&self, id: PostId) -> Result<LikeChange, FeedError> {
        let me = self.current_user.get().await?;
        let mut post = self.get(id).await?;
        let change = post.toggle_like(me.id);
        self.posts.update(&post).await?;
        tracing::debug!(post_id = %id, liked = change.is_liked(), "Like toggled");
        Ok(change)
    }

    /// Comment as the current user. The text is trimmed and must not be empty.
    pub async fn add_comment(&self, id: PostId, text: &str) -> Result<Comment, FeedError> {
        let text = CommentText::new(text)?;
        let me = self.current_user.get().await?;
        let mut post = self.get(id).await?;

        let comment = Comment::new(me.to_ref(), text, self.clock.now());
        post.add_comment(comment.clone());
        self.posts.update(&post).await?;
        Ok(comment)
    }

    pub async fn delete(&self, id: PostId) -> Result<Post, FeedError> {
        self.posts.delete(id).await.map_err(|e| {
            if e.is_not_found() {
                FeedError::NotFound(id)
            } else {
                FeedError::Repo(e)
            }
        })
    }
}
