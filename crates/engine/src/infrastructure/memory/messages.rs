//! In-memory conversation and message repository.

use async_trait::async_trait;
use glimpse_domain::{Conversation, ConversationId, Message, MessageId};

use super::latency::{Operation, SimulatedLatency};
use super::table::{Keyed, Table};
use crate::infrastructure::ports::{MessageRepo, RepoError};

impl Keyed for Conversation {
    type Key = ConversationId;
    const ENTITY: &'static str = "Conversation";

    fn key(&self) -> ConversationId {
        self.id
    }
}

impl Keyed for Message {
    type Key = MessageId;
    const ENTITY: &'static str = "Message";

    fn key(&self) -> MessageId {
        self.id
    }
}

pub struct MemoryMessageRepo {
    conversations: Table<Conversation>,
    messages: Table<Message>,
    latency: SimulatedLatency,
}

impl MemoryMessageRepo {
    pub fn new(
        conversations: Vec<Conversation>,
        messages: Vec<Message>,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            conversations: Table::new(conversations),
            messages: Table::new(messages),
            latency,
        }
    }
}

#[async_trait]
impl MessageRepo for MemoryMessageRepo {
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepoError> {
        self.latency.wait(Operation::ListConversations).await;
        Ok(self.conversations.all().await)
    }

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.conversations.get(id).await)
    }

    async fn update_conversation(&self, conversation: &Conversation) -> Result<(), RepoError> {
        self.latency.wait(Operation::Update).await;
        self.conversations.replace(conversation.clone()).await
    }

    async fn list_messages(
        &self,
        conversation: ConversationId,
    ) -> Result<Vec<Message>, RepoError> {
        self.latency.wait(Operation::ListMessages).await;
        let mut messages = self
            .messages
            .filter(|message| message.conversation_id == conversation)
            .await;
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn create_message(&self, message: &Message) -> Result<(), RepoError> {
        self.latency.wait(Operation::Create).await;
        self.messages.push(message.clone()).await
    }

    async fn mark_read(&self, id: MessageId) -> Result<Message, RepoError> {
        self.latency.wait(Operation::MarkRead).await;
        self.messages
            .modify(id, |message| {
                message.mark_read();
                message.clone()
            })
            .await
    }

    async fn delete_message(&self, id: MessageId) -> Result<Message, RepoError> {
        self.latency.wait(Operation::Delete).await;
        self.messages.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use glimpse_domain::{MessageText, UserId};

    fn message(conversation: ConversationId, minutes: i64) -> Message {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
        Message::new(
            conversation,
            UserId::new(),
            UserId::new(),
            MessageText::new("hey").unwrap(),
            at,
        )
    }

    #[tokio::test]
    async fn messages_are_oldest_first_within_a_conversation() {
        let conversation = ConversationId::new();
        let (late, early) = (message(conversation, 10), message(conversation, 1));
        let elsewhere = message(ConversationId::new(), 5);
        let repo = MemoryMessageRepo::new(
            Vec::new(),
            vec![late.clone(), elsewhere, early.clone()],
            SimulatedLatency::disabled(),
        );

        let ids: Vec<MessageId> = repo
            .list_messages(conversation)
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn mark_read_sets_flag_or_reports_missing() {
        let m = message(ConversationId::new(), 0);
        let repo = MemoryMessageRepo::new(Vec::new(), vec![m.clone()], SimulatedLatency::disabled());

        assert!(repo.mark_read(m.id).await.unwrap().read);
        assert!(repo.mark_read(MessageId::new()).await.unwrap_err().is_not_found());
    }
}
