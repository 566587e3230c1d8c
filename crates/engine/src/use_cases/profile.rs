//! Profile and search use cases.

use std::sync::Arc;

use glimpse_domain::common::contains_ignore_case;
use glimpse_domain::{Post, User};

use super::current_user::CurrentUser;
use crate::infrastructure::ports::{PostRepo, RepoError, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A user with their posts, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }
}

/// Profile and search operations.
pub struct ProfileOps {
    users: Arc<dyn UserRepo>,
    posts: Arc<dyn PostRepo>,
    current_user: Arc<CurrentUser>,
}

impl ProfileOps {
    pub fn new(
        users: Arc<dyn UserRepo>,
        posts: Arc<dyn PostRepo>,
        current_user: Arc<CurrentUser>,
    ) -> Self {
        Self {
            users,
            posts,
            current_user,
        }
    }

    pub async fn me(&self) -> Result<Profile, ProfileError> {
        let user = self.current_user.get().await.map_err(|e| {
            if e.is_not_found() {
                ProfileError::UserNotFound(self.current_user.username().to_string())
            } else {
                ProfileError::Repo(e)
            }
        })?;
        self.with_posts(user).await
    }

    pub async fn by_username(&self, username: &str) -> Result<Profile, ProfileError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| ProfileError::UserNotFound(username.to_string()))?;
        self.with_posts(user).await
    }

    /// Case-insensitive substring search. Users match on username or display
    /// name, posts on caption or author username. A blank query returns
    /// everything (the explore view).
    pub async fn search(&self, query: &str) -> Result<SearchResults, ProfileError> {
        let query = query.trim();
        let mut users = self.users.list().await?;
        let mut posts = self.posts.list().await?;

        if !query.is_empty() {
            users.retain(|user| {
                contains_ignore_case(user.username.as_str(), query)
                    || contains_ignore_case(&user.display_name, query)
            });
            posts.retain(|post| {
                contains_ignore_case(post.caption.as_str(), query)
                    || contains_ignore_case(post.author.username.as_str(), query)
            });
        }

        tracing::debug!(query, users = users.len(), posts = posts.len(), "Search");
        Ok(SearchResults { users, posts })
    }

    async fn with_posts(&self, user: User) -> Result<Profile, ProfileError> {
        let posts = self.posts.list_by_author(user.id).await?;
        Ok(Profile { user, posts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{MemoryPostRepo, MemoryUserRepo, SimulatedLatency};
    use chrono::{TimeZone, Utc};
    use glimpse_domain::{Caption, Username};

    fn user(name: &str, display: &str) -> User {
        User::new(Username::new(name).unwrap(), display)
    }

    fn post(author: &User, caption: &str) -> Post {
        Post::new(
            author.to_ref(),
            "https://img.example/p.jpg",
            Caption::new(caption).unwrap(),
            Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
        )
    }

    fn ops() -> (ProfileOps, User, User) {
        let me = user("you", "You");
        let sarah = user("sarah.j", "Sarah Johnson");
        let users: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new(
            vec![me.clone(), sarah.clone()],
            SimulatedLatency::disabled(),
        ));
        let posts = Arc::new(MemoryPostRepo::new(
            vec![
                post(&sarah, "Golden hour #sunset"),
                post(&me, "Morning walk"),
                post(&sarah, "Coffee first"),
            ],
            SimulatedLatency::disabled(),
        ));
        let ops = ProfileOps::new(
            users.clone(),
            posts,
            Arc::new(CurrentUser::new(users, "you")),
        );
        (ops, me, sarah)
    }

    #[tokio::test]
    async fn me_includes_only_my_posts() {
        let (ops, me, _) = ops();
        let profile = ops.me().await.unwrap();
        assert_eq!(profile.user.id, me.id);
        assert_eq!(profile.posts.len(), 1);
    }

    #[tokio::test]
    async fn by_username_is_case_insensitive_and_reports_missing() {
        let (ops, _, sarah) = ops();
        let profile = ops.by_username("SARAH.J").await.unwrap();
        assert_eq!(profile.user.id, sarah.id);
        assert_eq!(profile.posts.len(), 2);

        assert!(matches!(
            ops.by_username("nobody").await,
            Err(ProfileError::UserNotFound(name)) if name == "nobody"
        ));
    }

    #[tokio::test]
    async fn search_matches_names_captions_and_authors() {
        let (ops, _, sarah) = ops();

        let results = ops.search("johnson").await.unwrap();
        assert_eq!(results.users.len(), 1);
        assert_eq!(results.users[0].id, sarah.id);
        assert!(results.posts.is_empty());

        let results = ops.search("SUNSET").await.unwrap();
        assert_eq!(results.posts.len(), 1);

        let results = ops.search("sarah").await.unwrap();
        assert_eq!(results.posts.len(), 2);

        assert!(ops.search("zebra").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_query_returns_everything() {
        let (ops, _, _) = ops();
        let results = ops.search("   ").await.unwrap();
        assert_eq!(results.users.len(), 2);
        assert_eq!(results.posts.len(), 3);
    }
}
