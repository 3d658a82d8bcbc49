use chrono::Utc;
use tracing::debug;

use super::MemStore;
use crate::errors::AppError;
use crate::models::message::{Message, NewMessage};

impl MemStore {
    pub async fn create_message(&self, new_message: NewMessage) -> Result<Message, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.get(new_message.sender_id).is_none() {
            return Err(AppError::NotFound("Sender not found".to_string()));
        }
        if tables.users.get(new_message.receiver_id).is_none() {
            return Err(AppError::NotFound("Receiver not found".to_string()));
        }

        let message = tables.messages.insert_with(|id| Message {
            id,
            sender_id: new_message.sender_id,
            receiver_id: new_message.receiver_id,
            content: new_message.content,
            created_at: Utc::now(),
            is_read: false,
        });
        debug!(
            "Message {} from {} to {}",
            message.id, message.sender_id, message.receiver_id
        );
        Ok(message)
    }

    /// Both directions of a conversation, oldest first.
    pub async fn messages_between(&self, user_a: i32, user_b: i32) -> Vec<Message> {
        let tables = self.tables.read().await;
        let mut messages: Vec<_> = tables
            .messages
            .values()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        messages
    }

    pub async fn unread_count(&self, user_id: i32) -> usize {
        self.tables
            .read()
            .await
            .messages
            .values()
            .filter(|m| m.receiver_id == user_id && !m.is_read)
            .count()
    }

    /// Returns false when the message does not exist.
    pub async fn mark_message_read(&self, id: i32) -> bool {
        match self.tables.write().await.messages.get_mut(id) {
            Some(message) => {
                message.is_read = true;
                true
            }
            None => false,
        }
    }
}
