//! # Session Controller
//!
//! Per-chat conversation state machine. Every inbound event runs one
//! transition; failures are recovered here and never escape to the caller.
//!
//! Expected rejections (bad uploads, missing data, malformed filter replies,
//! unknown callbacks) send an error message, clear any pending input and leave
//! the uploaded data as it was. Internal failures reset the whole session and
//! answer with the capability summary.

use std::sync::Arc;

use teloxide::types::{ChatId, MessageId};
use tracing::{debug, error, info, warn};

use super::events::InboundEvent;
use super::messenger::Messenger;

// Import UI builder functions
use super::ui_builder::{
    answered_prompt, create_download_keyboard, create_filter_keyboard, create_sort_keyboard,
    create_upload_keyboard, escape, filter_prompt,
};

use crate::codec::FileFormat;
use crate::config::{BotSettings, StickerKind};
use crate::dialogue::{
    split_adm_and_coverage, AwaitedReply, CallbackAction, Command, FilterRequest, PendingAction,
    SessionState,
};
use crate::session_errors::SessionError;
use crate::wifi_errors::WifiError;
use crate::wifi_list::{FilterKey, SortKey, WifiList};

type TransitionResult = Result<(), SessionError>;

/// Conversation state machine of one chat
#[derive(Debug)]
pub struct SessionController {
    chat_id: ChatId,
    state: SessionState,
    settings: Arc<BotSettings>,
}

impl SessionController {
    pub fn new(chat_id: ChatId, settings: Arc<BotSettings>) -> Self {
        Self {
            chat_id,
            state: SessionState::default(),
            settings,
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn pending_action(&self) -> PendingAction {
        self.state.pending_action
    }

    pub fn last_collection(&self) -> Option<&WifiList> {
        self.state.last_collection.as_ref()
    }

    /// Drop the uploaded data and any pending input
    pub fn reset(&mut self) {
        info!(chat_id = %self.chat_id, "Session reset");
        self.state.reset();
    }

    /// Run one transition for an inbound event
    pub async fn handle(&mut self, event: InboundEvent, messenger: &dyn Messenger) {
        debug!(
            chat_id = %self.chat_id,
            event = event.kind(),
            pending_action = ?self.state.pending_action,
            "Handling event"
        );

        let mut callback_to_answer = None;
        let result = match event {
            InboundEvent::Text {
                text, reply_to, ..
            } => self.on_text(&text, reply_to, messenger).await,
            InboundEvent::Document {
                file_name, file_ref, ..
            } => self.on_document(file_name.as_deref(), &file_ref, messenger).await,
            InboundEvent::Callback {
                callback_id, data, ..
            } => {
                let result = self.on_callback(data.as_deref(), messenger).await;
                callback_to_answer = Some(callback_id);
                result
            }
            InboundEvent::Unsupported { .. } => {
                self.state.clear_pending();
                self.send_default_info(messenger).await
            }
        };

        if let Err(err) = result {
            self.recover(err, messenger).await;
        }

        if let Some(callback_id) = callback_to_answer {
            if let Err(e) = messenger.answer_callback(&callback_id).await {
                warn!(chat_id = %self.chat_id, error = %e, "Failed to answer callback query");
            }
        }

        debug!(
            chat_id = %self.chat_id,
            pending_action = ?self.state.pending_action,
            has_collection = self.state.last_collection.is_some(),
            "Event handled"
        );
    }

    async fn on_text(
        &mut self,
        text: &str,
        reply_to: Option<MessageId>,
        messenger: &dyn Messenger,
    ) -> TransitionResult {
        if let Some(command) = Command::parse(text) {
            self.state.clear_pending();
            return self.on_command(command, messenger).await;
        }

        if let Some(request) = self.state.pending_action.filter_request() {
            let awaited = self.state.awaited_reply.as_ref().map(|reply| reply.message_id);
            if reply_to.is_some() && reply_to == awaited {
                return self.apply_filter(request, text, messenger).await;
            }
            debug!(chat_id = %self.chat_id, "Text is not a reply to the filter prompt");
        }

        self.send_default_info(messenger).await
    }

    async fn on_command(&mut self, command: Command, messenger: &dyn Messenger) -> TransitionResult {
        info!(chat_id = %self.chat_id, command = ?command, "Command received");
        match command {
            Command::Help => self.send_default_info(messenger).await,
            Command::Upload => {
                let prompt = escape(&self.settings.text("choice-upload"));
                messenger
                    .send_choice(self.chat_id, &prompt, create_upload_keyboard())
                    .await?;
                Ok(())
            }
            Command::Download => {
                self.require_collection()?;
                let prompt = escape(&self.settings.text("choice-download"));
                messenger
                    .send_choice(self.chat_id, &prompt, create_download_keyboard())
                    .await?;
                Ok(())
            }
            Command::Sort => {
                self.require_collection()?;
                let prompt = escape(&self.settings.text("choice-sort"));
                messenger
                    .send_choice(self.chat_id, &prompt, create_sort_keyboard())
                    .await?;
                Ok(())
            }
            Command::Filter => {
                self.require_collection()?;
                let prompt = escape(&self.settings.text("choice-filter"));
                messenger
                    .send_choice(self.chat_id, &prompt, create_filter_keyboard(&self.settings))
                    .await?;
                Ok(())
            }
        }
    }

    async fn on_document(
        &mut self,
        file_name: Option<&str>,
        file_ref: &str,
        messenger: &dyn Messenger,
    ) -> TransitionResult {
        let Some(format) = self.state.pending_action.upload_format() else {
            debug!(chat_id = %self.chat_id, "Document received without a pending upload");
            self.state.clear_pending();
            return self.send_default_info(messenger).await;
        };
        // Whatever happens next, the upload is no longer pending
        self.state.clear_pending();

        let list = self.read_upload(format, file_name, file_ref, messenger).await?;
        info!(
            chat_id = %self.chat_id,
            format = format.extension(),
            records = list.len(),
            "File uploaded"
        );
        self.state.last_collection = Some(list);
        self.send_success("upload-success", messenger).await
    }

    async fn read_upload(
        &self,
        format: FileFormat,
        file_name: Option<&str>,
        file_ref: &str,
        messenger: &dyn Messenger,
    ) -> Result<WifiList, SessionError> {
        format.check_file_name(file_name.unwrap_or_default())?;
        let bytes = messenger
            .download_document(file_ref)
            .await
            .map_err(|e| WifiError::Download(e.to_string()))?;
        Ok(format.codec().read(&bytes)?)
    }

    async fn on_callback(&mut self, data: Option<&str>, messenger: &dyn Messenger) -> TransitionResult {
        let data = data.unwrap_or_default();
        let action =
            CallbackAction::parse(data).ok_or_else(|| SessionError::UnroutableAction(data.to_string()))?;
        info!(chat_id = %self.chat_id, action = data, "Callback received");

        self.state.clear_pending();
        match action {
            CallbackAction::Upload(format) => {
                let prompt = self
                    .settings
                    .text_args("upload-prompt", &[("format", format.extension())]);
                messenger.send_text(self.chat_id, &escape(&prompt)).await?;
                self.state.pending_action = PendingAction::awaiting_upload(format);
                Ok(())
            }
            CallbackAction::Download(format) => self.send_collection(format, messenger).await,
            CallbackAction::Sort(key) => self.sort(key, messenger).await,
            CallbackAction::Filter(request) => self.prompt_filter(request, messenger).await,
        }
    }

    async fn send_collection(&mut self, format: FileFormat, messenger: &dyn Messenger) -> TransitionResult {
        let list = self.require_collection()?;
        let bytes = format
            .codec()
            .write(list)
            .map_err(|e| SessionError::Internal(e.into()))?;
        let caption = escape(&self.settings.text("download-caption"));
        messenger
            .send_document(self.chat_id, bytes, &format.result_file_name(), &caption)
            .await?;
        info!(chat_id = %self.chat_id, format = format.extension(), "File sent");
        self.send_sticker(StickerKind::Success, messenger).await;
        Ok(())
    }

    async fn sort(&mut self, key: SortKey, messenger: &dyn Messenger) -> TransitionResult {
        let chat_id = self.chat_id;
        let list = self
            .state
            .last_collection
            .as_mut()
            .ok_or(SessionError::NoDataAvailable)?;
        list.sort(key);
        info!(chat_id = %chat_id, key = ?key, "Collection sorted");
        self.send_success("sort-success", messenger).await
    }

    async fn prompt_filter(&mut self, request: FilterRequest, messenger: &dyn Messenger) -> TransitionResult {
        self.require_collection()?;
        let prompt = filter_prompt(&self.settings, request);
        let message_id = messenger.send_text(self.chat_id, &prompt).await?;

        self.state.pending_action = request.pending_action();
        self.state.awaited_reply = Some(AwaitedReply { message_id, prompt });
        debug!(chat_id = %self.chat_id, prompt_id = message_id.0, "Waiting for filter reply");
        Ok(())
    }

    async fn apply_filter(
        &mut self,
        request: FilterRequest,
        text: &str,
        messenger: &dyn Messenger,
    ) -> TransitionResult {
        self.require_collection()?;
        let combined = match request {
            FilterRequest::AdmAndCoverageArea => Some(
                split_adm_and_coverage(text)
                    .map_err(|reason| SessionError::InvalidFilterInput(reason.to_string()))?,
            ),
            _ => None,
        };

        if let Some(reply) = self.state.awaited_reply.take() {
            let edited = answered_prompt(&reply.prompt);
            if let Err(e) = messenger.edit_text(self.chat_id, reply.message_id, &edited).await {
                warn!(chat_id = %self.chat_id, error = %e, "Failed to mark filter prompt as answered");
            }
        }

        let list = self
            .state
            .last_collection
            .as_mut()
            .ok_or(SessionError::NoDataAvailable)?;
        match (request, combined) {
            (FilterRequest::AdmAndCoverageArea, Some((adm_area, coverage_area))) => {
                list.select_adm_and_coverage(adm_area, coverage_area)
            }
            (FilterRequest::CoverageArea, _) => list.select(FilterKey::CoverageArea, text),
            (FilterRequest::ParkName, _) => list.select(FilterKey::ParkName, text),
            (FilterRequest::AdmAndCoverageArea, None) => {
                return Err(SessionError::InvalidFilterInput("line_count".to_string()))
            }
        }
        let remaining = list.len();

        self.state.clear_pending();
        info!(chat_id = %self.chat_id, filter = ?request, remaining, "Collection filtered");
        self.send_success("filter-success", messenger).await
    }

    fn require_collection(&self) -> Result<&WifiList, SessionError> {
        self.state
            .last_collection
            .as_ref()
            .ok_or(SessionError::NoDataAvailable)
    }

    async fn recover(&mut self, err: SessionError, messenger: &dyn Messenger) {
        if err.is_internal() {
            error!(chat_id = %self.chat_id, error = %err, "Internal failure, resetting session");
            self.reset();
            if let Err(e) = self.send_default_info(messenger).await {
                error!(chat_id = %self.chat_id, error = %e, "Failed to send capability summary");
            }
            return;
        }

        warn!(chat_id = %self.chat_id, error = %err, "Request rejected");
        self.state.clear_pending();
        if let Err(e) = self.send_error(err.message_key(), messenger).await {
            error!(chat_id = %self.chat_id, error = %e, "Failed to send error message, resetting session");
            self.reset();
        }
    }

    async fn send_default_info(&self, messenger: &dyn Messenger) -> TransitionResult {
        messenger
            .send_text(self.chat_id, &escape(self.settings.description()))
            .await?;
        self.send_sticker(StickerKind::Default, messenger).await;
        Ok(())
    }

    async fn send_success(&self, key: &str, messenger: &dyn Messenger) -> TransitionResult {
        messenger
            .send_text(self.chat_id, &escape(&self.settings.text(key)))
            .await?;
        self.send_sticker(StickerKind::Success, messenger).await;
        Ok(())
    }

    async fn send_error(&self, key: &str, messenger: &dyn Messenger) -> TransitionResult {
        messenger
            .send_text(self.chat_id, &escape(&self.settings.text(key)))
            .await?;
        self.send_sticker(StickerKind::Error, messenger).await;
        Ok(())
    }

    /// Stickers are decoration; a failed send is only logged
    async fn send_sticker(&self, kind: StickerKind, messenger: &dyn Messenger) {
        let Some(sticker_id) = self.settings.sticker(kind) else {
            return;
        };
        if let Err(e) = messenger.send_sticker(self.chat_id, sticker_id).await {
            warn!(chat_id = %self.chat_id, error = %e, sticker = ?kind, "Failed to send sticker");
        }
    }
}
