//! Validated text newtypes for domain entities
//!
//! These newtypes ensure that user-entered text is valid by construction:
//! - Non-empty after trimming
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for usernames
const MAX_USERNAME_LENGTH: usize = 30;

/// Maximum length for post captions
const MAX_CAPTION_LENGTH: usize = 2200;

/// Maximum length for comments and direct messages
const MAX_MESSAGE_LENGTH: usize = 1000;

// ============================================================================
// Username
// ============================================================================

/// A validated username (1-30 chars of ASCII letters, digits, `.` or `_`)
///
/// Usernames are handles, so unlike the other text types they may not
/// contain spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new validated username.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The username is empty after trimming
    /// - The username exceeds 30 characters
    /// - The username contains characters other than letters, digits, `.` and `_`
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username cannot exceed {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '_'))
        {
            return Err(DomainError::validation(format!(
                "Username contains invalid character '{}'",
                bad
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, used for profile lookups by handle.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> String {
        name.0
    }
}

// ============================================================================
// Caption
// ============================================================================

/// A validated post caption (non-empty, <=2200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Caption(String);

impl Caption {
    /// Create a new validated caption.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The caption is empty after trimming
    /// - The caption exceeds 2200 characters after trimming
    pub fn new(caption: impl Into<String>) -> Result<Self, DomainError> {
        let caption = caption.into();
        let trimmed = caption.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Caption cannot be empty"));
        }
        if trimmed.chars().count() > MAX_CAPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Caption cannot exceed {} characters",
                MAX_CAPTION_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the caption as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hashtags mentioned in the caption, without the leading `#`.
    pub fn hashtags(&self) -> Vec<&str> {
        self.0
            .split_whitespace()
            .filter_map(|word| word.strip_prefix('#'))
            .map(|tag| tag.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '_'))
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Caption {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Caption> for String {
    fn from(caption: Caption) -> String {
        caption.0
    }
}

// ============================================================================
// CommentText
// ============================================================================

/// A validated comment body (non-empty, <=1000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Create a new validated comment body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text is empty after trimming
    /// or exceeds 1000 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Comment cannot be empty"));
        }
        if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::validation(format!(
                "Comment cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the comment as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CommentText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommentText> for String {
    fn from(text: CommentText) -> String {
        text.0
    }
}

// ============================================================================
// MessageText
// ============================================================================

/// A validated direct message body (non-empty, <=1000 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Create a new validated message body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text is empty after trimming
    /// or exceeds 1000 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Message cannot be empty"));
        }
        if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::validation(format!(
                "Message cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the message as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MessageText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<MessageText> for String {
    fn from(text: MessageText) -> String {
        text.0
    }
}
