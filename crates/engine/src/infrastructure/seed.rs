//! Seed data for the in-memory repositories.

use std::path::Path;

use glimpse_domain::{Activity, Conversation, Message, Post, Story, User};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::RepoError;

const EMBEDDED_SEED: &str = include_str!("../../fixtures/seed.json");

/// Everything the in-memory store starts with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub stories: Vec<Story>,
    pub posts: Vec<Post>,
    pub activities: Vec<Activity>,
    pub conversations: Vec<Conversation>,
    pub messages: Vec<Message>,
}

impl SeedData {
    /// The seed compiled into the binary.
    pub fn embedded() -> Result<Self, RepoError> {
        Self::from_json(EMBEDDED_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, RepoError> {
        serde_json::from_str(json).map_err(RepoError::serialization)
    }

    pub fn from_path(path: &Path) -> Result<Self, RepoError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RepoError::storage("read_seed", format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_domain::ActivityKind;

    #[test]
    fn embedded_seed_parses() {
        let seed = SeedData::embedded().unwrap();
        assert!(seed.users.iter().any(|u| u.username.as_str() == "you"));
        assert_eq!(seed.stories.len(), 5);
        assert_eq!(seed.posts.len(), 4);
        assert_eq!(seed.conversations.len(), 2);
        assert_eq!(seed.messages.len(), 5);
    }

    #[test]
    fn unknown_activity_kinds_become_other() {
        let seed = SeedData::embedded().unwrap();
        assert!(seed
            .activities
            .iter()
            .any(|a| a.kind == ActivityKind::Other));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = SeedData::from_json("{}").unwrap();
        assert!(seed.users.is_empty());
        assert!(seed.stories.is_empty());
    }

    #[test]
    fn invalid_usernames_are_rejected() {
        let json = r#"{"users":[{"id":"a1000000-0000-4000-8000-000000000009","username":"no spaces","displayName":"X"}]}"#;
        assert!(matches!(
            SeedData::from_json(json),
            Err(RepoError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let err = SeedData::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, RepoError::Storage { .. }));
    }
}
