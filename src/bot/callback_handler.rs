//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::debug;

use super::events::InboundEvent;
use super::messenger::TelegramMessenger;
use super::session_registry::SessionRegistry;

/// Convert a callback query into a transport-independent event.
///
/// Queries whose message is no longer available are routed to the
/// private chat of the user who pressed the button.
pub fn inbound_from_callback(q: &CallbackQuery) -> InboundEvent {
    let chat_id = q
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));

    InboundEvent::Callback {
        chat_id,
        callback_id: q.id.0.clone(),
        message_id: q.message.as_ref().map(|message| message.id()),
        data: q.data.clone(),
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    q: CallbackQuery,
    registry: Arc<SessionRegistry>,
    messenger: Arc<TelegramMessenger>,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    let event = inbound_from_callback(&q);
    registry.dispatch(event, messenger.as_ref()).await;
    Ok(())
}
