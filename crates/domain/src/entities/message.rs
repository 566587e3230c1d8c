//! Direct messaging entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::value_objects::MessageText;
use crate::{ConversationId, MessageId, UserId};

/// A one-to-one conversation as seen by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    /// The other participant
    #[serde(rename = "user")]
    pub participant: UserRef,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(participant: UserRef, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: ConversationId::new(),
            participant,
            last_message: None,
            unread_count: 0,
            updated_at,
        }
    }

    /// Record a message as the latest in this conversation
    pub fn touch(&mut self, message: &Message) {
        self.last_message = Some(message.text.to_string());
        self.updated_at = message.created_at;
    }
}

/// A single direct message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: MessageText,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message
    pub fn new(
        conversation_id: ConversationId,
        sender_id: UserId,
        receiver_id: UserId,
        text: MessageText,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            sender_id,
            receiver_id,
            text,
            read: false,
            created_at,
        }
    }

    /// Mark as read. Returns `true` if this call changed the flag.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
