//! In-memory post repository.

use async_trait::async_trait;
use glimpse_domain::{Post, PostId, UserId};

use super::latency::{Operation, SimulatedLatency};
use super::table::{Keyed, Table};
use crate::infrastructure::ports::{PostRepo, RepoError};

impl Keyed for Post {
    type Key = PostId;
    const ENTITY: &'static str = "Post";

    fn key(&self) -> PostId {
        self.id
    }
}

pub struct MemoryPostRepo {
    posts: Table<Post>,
    latency: SimulatedLatency,
}

impl MemoryPostRepo {
    pub fn new(posts: Vec<Post>, latency: SimulatedLatency) -> Self {
        Self {
            posts: Table::new(posts),
            latency,
        }
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        self.latency.wait(Operation::ListPosts).await;
        Ok(newest_first(self.posts.all().await))
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.posts.get(id).await)
    }

    async fn create(&self, post: &Post) -> Result<(), RepoError> {
        self.latency.wait(Operation::Create).await;
        self.posts.push_front(post.clone()).await
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        self.latency.wait(Operation::Update).await;
        self.posts.replace(post.clone()).await
    }

    async fn delete(&self, id: PostId) -> Result<Post, RepoError> {
        self.latency.wait(Operation::Delete).await;
        self.posts.remove(id).await
    }

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>, RepoError> {
        self.latency.wait(Operation::ListPosts).await;
        Ok(newest_first(
            self.posts.filter(|post| post.author.id == author).await,
        ))
    }
}
