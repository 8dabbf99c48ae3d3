//! Session registry: one controller per chat, kept for the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tracing::info;

use super::events::InboundEvent;
use super::messenger::Messenger;
use super::session_controller::SessionController;
use crate::config::BotSettings;

/// Shared handle to one chat's controller
pub type SharedSession = Arc<Mutex<SessionController>>;

/// Chat id to session map.
///
/// The outer lock only guards lookup and insertion, so first contact from
/// the same chat can never create two controllers. Each controller has its own
/// lock, held for the whole transition, which serializes events per chat while
/// different chats proceed in parallel.
pub struct SessionRegistry {
    settings: Arc<BotSettings>,
    sessions: Mutex<HashMap<ChatId, SharedSession>>,
}

impl SessionRegistry {
    pub fn new(settings: Arc<BotSettings>) -> Self {
        Self {
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Existing controller for the chat, or a fresh one with no pending input
    pub async fn get_or_create(&self, chat_id: ChatId) -> SharedSession {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| {
                info!(chat_id = %chat_id, "Creating session");
                Arc::new(Mutex::new(SessionController::new(
                    chat_id,
                    Arc::clone(&self.settings),
                )))
            })
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Route an event to its chat's controller and run the transition
    pub async fn dispatch(&self, event: InboundEvent, messenger: &dyn Messenger) {
        let session = self.get_or_create(event.chat_id()).await;
        let mut controller = session.lock().await;
        controller.handle(event, messenger).await;
    }
}
