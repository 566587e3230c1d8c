//! In-memory story repository.

use async_trait::async_trait;
use glimpse_domain::{Story, StoryId, UserId};

use super::latency::{Operation, SimulatedLatency};
use super::table::{Keyed, Table};
use crate::infrastructure::ports::{RepoError, StoryRepo};

impl Keyed for Story {
    type Key = StoryId;
    const ENTITY: &'static str = "Story";

    fn key(&self) -> StoryId {
        self.id
    }
}

pub struct MemoryStoryRepo {
    stories: Table<Story>,
    latency: SimulatedLatency,
}

impl MemoryStoryRepo {
    pub fn new(stories: Vec<Story>, latency: SimulatedLatency) -> Self {
        Self {
            stories: Table::new(stories),
            latency,
        }
    }
}

#[async_trait]
impl StoryRepo for MemoryStoryRepo {
    async fn list(&self) -> Result<Vec<Story>, RepoError> {
        self.latency.wait(Operation::ListStories).await;
        Ok(self.stories.all().await)
    }

    async fn get(&self, id: StoryId) -> Result<Option<Story>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.stories.get(id).await)
    }

    async fn create(&self, story: &Story) -> Result<(), RepoError> {
        self.latency.wait(Operation::Create).await;
        self.stories.push(story.clone()).await
    }

    async fn update(&self, story: &Story) -> Result<(), RepoError> {
        self.latency.wait(Operation::Update).await;
        self.stories.replace(story.clone()).await
    }

    async fn delete(&self, id: StoryId) -> Result<Story, RepoError> {
        self.latency.wait(Operation::Delete).await;
        self.stories.remove(id).await
    }

    async fn mark_viewed(&self, id: StoryId) -> Result<Story, RepoError> {
        self.latency.wait(Operation::Update).await;
        self.stories
            .modify(id, |story| {
                story.mark_viewed();
                story.clone()
            })
            .await
    }

    async fn latest_by_author(&self, author: UserId) -> Result<Option<Story>, RepoError> {
        self.latency.wait(Operation::Get).await;
        let mut mine = self.stories.filter(|story| story.author.id == author).await;
        // Stable sort keeps the later insert first on equal timestamps.
        mine.reverse();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use glimpse_domain::{UserRef, Username};

    fn author(name: &str) -> UserRef {
        UserRef {
            id: UserId::new(),
            username: Username::new(name).unwrap(),
            avatar: None,
        }
    }

    fn story(author: &UserRef, minutes: i64) -> Story {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        Story::new(author.clone(), "https://img.example/s.jpg", at)
    }

    #[tokio::test]
    async fn mark_viewed_is_idempotent() {
        let ana = author("ana");
        let s = story(&ana, 0);
        let repo = MemoryStoryRepo::new(vec![s.clone()], SimulatedLatency::disabled());

        assert!(repo.mark_viewed(s.id).await.unwrap().viewed);
        assert!(repo.mark_viewed(s.id).await.unwrap().viewed);
        assert!(repo.get(s.id).await.unwrap().unwrap().viewed);
    }

    #[tokio::test]
    async fn mark_viewed_unknown_story_is_not_found() {
        let repo = MemoryStoryRepo::new(Vec::new(), SimulatedLatency::disabled());
        let err = repo.mark_viewed(StoryId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let ana = author("ana");
        let (a, b) = (story(&ana, 10), story(&ana, 0));
        let repo = MemoryStoryRepo::new(vec![a.clone()], SimulatedLatency::disabled());
        repo.create(&b).await.unwrap();

        let ids: Vec<StoryId> = repo.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn latest_by_author_picks_newest_of_that_author() {
        let (ana, ben) = (author("ana"), author("ben"));
        let old = story(&ana, 0);
        let new = story(&ana, 30);
        let other = story(&ben, 60);
        let repo = MemoryStoryRepo::new(
            vec![old, new.clone(), other],
            SimulatedLatency::disabled(),
        );

        let latest = repo.latest_by_author(ana.id).await.unwrap().unwrap();
        assert_eq!(latest.id, new.id);
        assert!(repo.latest_by_author(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_returns_removed_story() {
        let ana = author("ana");
        let s = story(&ana, 0);
        let repo = MemoryStoryRepo::new(vec![s.clone()], SimulatedLatency::disabled());

        assert_eq!(repo.delete(s.id).await.unwrap().id, s.id);
        assert!(repo.delete(s.id).await.unwrap_err().is_not_found());
    }
}
