//! Outbound messaging used by the session controller, with the Telegram
//! implementation.
//!
//! Text handed to a [`Messenger`] is MarkdownV2 that the caller has already
//! escaped.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId,
    ParseMode,
};
use tracing::debug;

/// One inline keyboard button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceButton {
    pub label: String,
    pub data: String,
}

impl ChoiceButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Chat operations the bot needs; delivery and retries are the implementor's concern
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId>;

    async fn send_document(
        &self,
        chat_id: ChatId,
        bytes: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<()>;

    /// Send a prompt with an inline keyboard, one `Vec` per keyboard row
    async fn send_choice(
        &self,
        chat_id: ChatId,
        prompt: &str,
        rows: Vec<Vec<ChoiceButton>>,
    ) -> Result<MessageId>;

    async fn edit_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<()>;

    async fn send_sticker(&self, chat_id: ChatId, sticker_id: &str) -> Result<()>;

    async fn download_document(&self, file_ref: &str) -> Result<Vec<u8>>;

    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}

/// [`Messenger`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    http: reqwest::Client,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId> {
        let sent = self
            .bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .disable_notification(true)
            .await?;
        Ok(sent.id)
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        bytes: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        let document = InputFile::memory(bytes).file_name(file_name.to_string());
        self.bot
            .send_document(chat_id, document)
            .caption(caption)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        Ok(())
    }

    async fn send_choice(
        &self,
        chat_id: ChatId,
        prompt: &str,
        rows: Vec<Vec<ChoiceButton>>,
    ) -> Result<MessageId> {
        let keyboard = InlineKeyboardMarkup::new(rows.into_iter().map(|row| {
            row.into_iter()
                .map(|button| InlineKeyboardButton::callback(button.label, button.data))
                .collect::<Vec<_>>()
        }));
        let sent = self
            .bot
            .send_message(chat_id, prompt)
            .parse_mode(ParseMode::MarkdownV2)
            .disable_notification(true)
            .reply_markup(keyboard)
            .await?;
        Ok(sent.id)
    }

    async fn edit_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        Ok(())
    }

    async fn send_sticker(&self, chat_id: ChatId, sticker_id: &str) -> Result<()> {
        self.bot
            .send_sticker(chat_id, InputFile::file_id(FileId(sticker_id.to_string())))
            .disable_notification(true)
            .await?;
        Ok(())
    }

    async fn download_document(&self, file_ref: &str) -> Result<Vec<u8>> {
        let file = self.bot.get_file(FileId(file_ref.to_string())).await?;
        let url = format!(
            "https://api.telegram.org/file/bot{}/{}",
            self.bot.token(),
            file.path
        );

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "Document downloaded");
        Ok(bytes.to_vec())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await?;
        Ok(())
    }
}
