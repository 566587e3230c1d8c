//! Story use cases: listing, uploading and bookkeeping of viewed stories.

use std::sync::Arc;

use glimpse_domain::common::none_if_blank;
use glimpse_domain::{DomainError, ImageFilter, Story, StoryId};

use super::current_user::CurrentUser;
use crate::infrastructure::ports::{ClockPort, RepoError, StoryRepo};

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("Story not found: {0}")]
    NotFound(StoryId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

fn map_not_found(id: StoryId) -> impl FnOnce(RepoError) -> StoryError {
    move |e| {
        if e.is_not_found() {
            StoryError::NotFound(id)
        } else {
            StoryError::Repo(e)
        }
    }
}

/// Story operations.
pub struct StoryOps {
    stories: Arc<dyn StoryRepo>,
    current_user: Arc<CurrentUser>,
    clock: Arc<dyn ClockPort>,
}

impl StoryOps {
    pub fn new(
        stories: Arc<dyn StoryRepo>,
        current_user: Arc<CurrentUser>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            stories,
            current_user,
            clock,
        }
    }

    /// The repository the viewer reports viewed stories to.
    pub fn repo(&self) -> Arc<dyn StoryRepo> {
        self.stories.clone()
    }

    pub async fn list(&self) -> Result<Vec<Story>, StoryError> {
        Ok(self.stories.list().await?)
    }

    pub async fn get(&self, id: StoryId) -> Result<Story, StoryError> {
        self.stories.get(id).await?.ok_or(StoryError::NotFound(id))
    }

    /// Post a story as the current user.
    pub async fn upload(&self, image: &str, filter: ImageFilter) -> Result<Story, StoryError> {
        let image = none_if_blank(image)
            .ok_or_else(|| DomainError::validation("Please select an image"))?;
        let author = self.current_user.get().await?;

        let story = Story::new(author.to_ref(), image, self.clock.now()).with_filter(filter);
        self.stories.create(&story).await?;
        tracing::info!(story_id = %story.id, author = %author.username, filter = %filter, "Story uploaded");
        Ok(story)
    }

    /// The current user's most recent story, if they have one.
    pub async fn current_user_story(&self) -> Result<Option<Story>, StoryError> {
        let me = self.current_user.get().await?;
        Ok(self.stories.latest_by_author(me.id).await?)
    }

    pub async fn mark_viewed(&self, id: StoryId) -> Result<Story, StoryError> {
        self.stories.mark_viewed(id).await.map_err(map_not_found(id))
    }

    pub async fn delete(&self, id: StoryId) -> Result<Story, StoryError> {
        self.stories.delete(id).await.map_err(map_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockStoryRepo, MockUserRepo};
    use chrono::{TimeZone, Utc};
    use glimpse_domain::{User, Username};
    use mockall::predicate::*;

    fn me() -> User {
        User::new(Username::new("you").unwrap(), "You")
    }

    fn ops(stories: MockStoryRepo, users: MockUserRepo) -> StoryOps {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        StoryOps::new(
            Arc::new(stories),
            Arc::new(CurrentUser::new(Arc::new(users), "you")),
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn get_missing_story_is_not_found() {
        let id = StoryId::new();
        let mut stories = MockStoryRepo::new();
        stories.expect_get().with(eq(id)).returning(|_| Ok(None));

        let err = ops(stories, MockUserRepo::new()).get(id).await.unwrap_err();
        assert!(matches!(err, StoryError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn upload_creates_unviewed_story_by_current_user() {
        let user = me();
        let user_id = user.id;
        let mut users = MockUserRepo::new();
        users
            .expect_get_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut stories = MockStoryRepo::new();
        stories
            .expect_create()
            .withf(move |s| s.author.id == user_id && !s.viewed && s.filter == ImageFilter::Sepia)
            .times(1)
            .returning(|_| Ok(()));

        let story = ops(stories, users)
            .upload("data:image/png;base64,AAAA", ImageFilter::Sepia)
            .await
            .unwrap();
        assert_eq!(story.author.id, user_id);
        assert_eq!(
            story.created_at,
            Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn upload_without_image_is_rejected_before_touching_repos() {
        let err = ops(MockStoryRepo::new(), MockUserRepo::new())
            .upload("   ", ImageFilter::None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn mark_viewed_maps_missing_story() {
        let id = StoryId::new();
        let mut stories = MockStoryRepo::new();
        stories
            .expect_mark_viewed()
            .returning(|id| Err(RepoError::not_found("Story", id)));

        let err = ops(stories, MockUserRepo::new())
            .mark_viewed(id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn current_user_story_queries_by_author() {
        let user = me();
        let user_id = user.id;
        let mut users = MockUserRepo::new();
        users
            .expect_get_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        let mut stories = MockStoryRepo::new();
        stories
            .expect_latest_by_author()
            .with(eq(user_id))
            .returning(|_| Ok(None));

        assert!(ops(stories, users)
            .current_user_story()
            .await
            .unwrap()
            .is_none());
    }
}
