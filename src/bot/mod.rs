//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `events`: Transport-independent inbound events
//! - `messenger`: Outbound chat operations and their Telegram implementation
//! - `session_controller`: Per-chat state machine
//! - `session_registry`: Chat id to session map
//! - `message_handler`: Converts incoming messages into events
//! - `callback_handler`: Converts inline keyboard callback queries into events
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod events;
pub mod message_handler;
pub mod messenger;
pub mod session_controller;
pub mod session_registry;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use events::InboundEvent;
pub use messenger::{ChoiceButton, Messenger, TelegramMessenger};
pub use session_controller::SessionController;
pub use session_registry::{SessionRegistry, SharedSession};
