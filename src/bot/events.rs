//! Inbound events, independent of the Telegram update types

use teloxide::types::{ChatId, MessageId};

/// One inbound chat event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Text {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
        reply_to: Option<MessageId>,
    },
    Document {
        chat_id: ChatId,
        message_id: MessageId,
        file_name: Option<String>,
        /// Messenger-side file reference used to download the content
        file_ref: String,
    },
    Callback {
        chat_id: ChatId,
        callback_id: String,
        message_id: Option<MessageId>,
        data: Option<String>,
    },
    /// A message kind the bot does not process (photo, sticker, ...)
    Unsupported { chat_id: ChatId, message_id: MessageId },
}

impl InboundEvent {
    pub fn chat_id(&self) -> ChatId {
        match self {
            InboundEvent::Text { chat_id, .. }
            | InboundEvent::Document { chat_id, .. }
            | InboundEvent::Callback { chat_id, .. }
            | InboundEvent::Unsupported { chat_id, .. } => *chat_id,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Text { .. } => "text",
            InboundEvent::Document { .. } => "document",
            InboundEvent::Callback { .. } => "callback",
            InboundEvent::Unsupported { .. } => "unsupported",
        }
    }
}
