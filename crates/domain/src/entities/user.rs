//! User entity - account profile and the author snapshot embedded in content

use serde::{Deserialize, Serialize};

use crate::value_objects::Username;
use crate::UserId;

/// Avatar generator used when a user has not uploaded a picture.
const AVATAR_FALLBACK_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// A user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub posts_count: u32,
    #[serde(default)]
    pub is_private: bool,
}

impl User {
    /// Create a new public user with zeroed counters
    pub fn new(username: Username, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username,
            display_name: display_name.into(),
            avatar: None,
            bio: String::new(),
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            is_private: false,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Snapshot of this user for embedding in stories, posts and activity
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Author snapshot embedded in content records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    pub username: Username,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserRef {
    /// The uploaded avatar, or a generated one seeded by the username
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) => url.clone(),
            None => format!("{}{}", AVATAR_FALLBACK_BASE, self.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_public_with_zero_counts() {
        let user = User::new(Username::new("sam").unwrap(), "Sam");
        assert_eq!(user.followers_count, 0);
        assert_eq!(user.posts_count, 0);
        assert!(!user.is_private);
    }

    #[test]
    fn avatar_url_falls_back_to_generated() {
        let user = User::new(Username::new("sam").unwrap(), "Sam");
        assert_eq!(
            user.to_ref().avatar_url(),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=sam"
        );

        let user = user.with_avatar("https://cdn.example/sam.png");
        assert_eq!(user.to_ref().avatar_url(), "https://cdn.example/sam.png");
    }
}
