use std::sync::Arc;

use serenity::all::{ChannelId, MessageId};
use serenity::async_trait;
use serenity::builder::EditMessage;
use serenity::http::Http;

use crate::error::ResponderError;

/// Handle to a message previously sent through a [`ChannelResponder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage(pub u64);

/// Where command output goes. Every call is awaited before the next one so
/// messages appear in the order they were produced.
#[async_trait]
pub trait ChannelResponder: Send + Sync {
    async fn send(&self, content: &str) -> Result<SentMessage, ResponderError>;
    async fn edit(&self, message: SentMessage, content: &str) -> Result<(), ResponderError>;
    async fn delete(&self, message: SentMessage) -> Result<(), ResponderError>;
}

pub struct SerenityResponder {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl ChannelResponder for SerenityResponder {
    async fn send(&self, content: &str) -> Result<SentMessage, ResponderError> {
        let message = self.channel_id.say(&self.http, content).await?;
        Ok(SentMessage(message.id.get()))
    }

    async fn edit(&self, message: SentMessage, content: &str) -> Result<(), ResponderError> {
        self.channel_id
            .edit_message(&self.http, MessageId::new(message.0), EditMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn delete(&self, message: SentMessage) -> Result<(), ResponderError> {
        self.channel_id
            .delete_message(&self.http, MessageId::new(message.0))
            .await?;
        Ok(())
    }
}
