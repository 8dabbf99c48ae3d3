//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use super::events::InboundEvent;
use super::messenger::TelegramMessenger;
use super::session_registry::SessionRegistry;

/// Convert a Telegram message into a transport-independent event
pub fn inbound_from_message(msg: &Message) -> InboundEvent {
    let chat_id = msg.chat.id;
    let message_id = msg.id;

    if let Some(text) = msg.text() {
        InboundEvent::Text {
            chat_id,
            message_id,
            text: text.to_string(),
            reply_to: msg.reply_to_message().map(|reply| reply.id),
        }
    } else if let Some(document) = msg.document() {
        InboundEvent::Document {
            chat_id,
            message_id,
            file_name: document.file_name.clone(),
            file_ref: document.file.id.0.clone(),
        }
    } else {
        InboundEvent::Unsupported { chat_id, message_id }
    }
}

pub async fn message_handler(
    msg: Message,
    registry: Arc<SessionRegistry>,
    messenger: Arc<TelegramMessenger>,
) -> Result<()> {
    let event = inbound_from_message(&msg);
    debug!(user_id = %msg.chat.id, kind = event.kind(), "Received message from user");

    registry.dispatch(event, messenger.as_ref()).await;
    Ok(())
}
