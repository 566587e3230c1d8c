//! Direct message use cases.

use std::sync::Arc;

use glimpse_domain::{
    Conversation, ConversationId, DomainError, Message, MessageId, MessageText,
};

use super::current_user::CurrentUser;
use crate::infrastructure::ports::{ClockPort, MessageRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Messaging operations.
pub struct MessageOps {
    messages: Arc<dyn MessageRepo>,
    current_user: Arc<CurrentUser>,
    clock: Arc<dyn ClockPort>,
}

impl MessageOps {
    pub fn new(
        messages: Arc<dyn MessageRepo>,
        current_user: Arc<CurrentUser>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            messages,
            current_user,
            clock,
        }
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>, MessageError> {
        Ok(self.messages.list_conversations().await?)
    }

    /// Messages of a conversation, oldest first.
    pub async fn messages(&self, id: ConversationId) -> Result<Vec<Message>, MessageError> {
        self.conversation(id).await?;
        Ok(self.messages.list_messages(id).await?)
    }

    /// Send `text` to the other participant as the current user.
    pub async fn send(&self, id: ConversationId, text: &str) -> Result<Message, MessageError> {
        let text = MessageText::new(text)?;
        let mut conversation = self.conversation(id).await?;
        let me = self.current_user.get().await?;

        let message = Message::new(
            id,
            me.id,
            conversation.participant.id,
            text,
            self.clock.now(),
        );
        self.messages.create_message(&message).await?;

        conversation.touch(&message);
        self.messages.update_conversation(&conversation).await?;
        tracing::debug!(conversation_id = %id, message_id = %message.id, "Message sent");
        Ok(message)
    }

    pub async fn mark_read(&self, id: MessageId) -> Result<Message, MessageError> {
        self.messages.mark_read(id).await.map_err(|e| {
            if e.is_not_found() {
                MessageError::MessageNotFound(id)
            } else {
                MessageError::Repo(e)
            }
        })
    }

    pub async fn delete(&self, id: MessageId) -> Result<Message, MessageError> {
        self.messages.delete_message(id).await.map_err(|e| {
            if e.is_not_found() {
                MessageError::MessageNotFound(id)
            } else {
                MessageError::Repo(e)
            }
        })
    }

    async fn conversation(&self, id: ConversationId) -> Result<Conversation, MessageError> {
        self.messages
            .get_conversation(id)
            .await?
            .ok_or(MessageError::ConversationNotFound(id))
    }
}
