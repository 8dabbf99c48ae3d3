//! # Bot Configuration Module
//!
//! Runtime settings read from the environment (after `.env` is loaded) and
//! the shared, read-only settings every session controller receives.

use anyhow::{anyhow, Result};
use std::env;

use crate::localization::{LocalizationManager, DEFAULT_LANGUAGE};

// Stickers sent after informational, success and error messages
pub const DEFAULT_STICKER: &str =
    "CAACAgIAAxkBAAEqU8Jl-HhpoWXxfiwy439knRHEdHgG7QACDhoAApyb-Ustq5zGUsoOaTQE";
pub const SUCCESS_STICKER: &str =
    "CAACAgIAAxkBAAEqU8xl-Hw_YNQEca-F6IplBmV_C3PJjQACwhQAArP70Eg4qTcl7eNzqjQE";
pub const ERROR_STICKER: &str =
    "CAACAgIAAxkBAAEqVRxl-KC-oFK7Rf00qdTw_DGN4DChoAACchcAAoL78Et6TFFCJ0bHwjQE";

/// Which sticker accompanies a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerKind {
    Default,
    Success,
    Error,
}

/// Sticker file ids; `None` disables the sticker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerSet {
    pub default: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Default for StickerSet {
    fn default() -> Self {
        Self {
            default: Some(DEFAULT_STICKER.to_string()),
            success: Some(SUCCESS_STICKER.to_string()),
            error: Some(ERROR_STICKER.to_string()),
        }
    }
}

impl StickerSet {
    /// No stickers at all
    pub fn disabled() -> Self {
        Self {
            default: None,
            success: None,
            error: None,
        }
    }

    pub fn get(&self, kind: StickerKind) -> Option<&str> {
        match kind {
            StickerKind::Default => self.default.as_deref(),
            StickerKind::Success => self.success.as_deref(),
            StickerKind::Error => self.error.as_deref(),
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Language of user-facing messages
    pub language: String,
    /// Override for the capability summary
    pub description: Option<String>,
    pub stickers: StickerSet,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        // Unset keeps the default sticker, an empty value disables it
        let sticker = |key: &str, default: &str| match lookup(key) {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value),
            None => Some(default.to_string()),
        };

        Ok(Self {
            token,
            language: lookup("BOT_LOCALE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            description: lookup("BOT_DESCRIPTION").filter(|text| !text.trim().is_empty()),
            stickers: StickerSet {
                default: sticker("STICKER_DEFAULT", DEFAULT_STICKER),
                success: sticker("STICKER_SUCCESS", SUCCESS_STICKER),
                error: sticker("STICKER_ERROR", ERROR_STICKER),
            },
            json_logs: lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }
}

/// Read-only settings shared by every session
#[derive(Debug)]
pub struct BotSettings {
    localization: LocalizationManager,
    language: String,
    description: String,
    stickers: StickerSet,
}

impl BotSettings {
    pub fn new(language: &str, description: Option<String>, stickers: StickerSet) -> Result<Self> {
        let localization = LocalizationManager::new()?;
        let language = if localization.supports(language) {
            language.to_string()
        } else {
            tracing::warn!(language, "Unsupported language, falling back to default");
            DEFAULT_LANGUAGE.to_string()
        };
        let description = description
            .unwrap_or_else(|| localization.get_message_in_language("bot-description", &language, None));

        Ok(Self {
            localization,
            language,
            description,
            stickers,
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Self::new(&config.language, config.description.clone(), config.stickers.clone())
    }

    /// Localized message
    pub fn text(&self, key: &str) -> String {
        self.localization.get_message_in_language(key, &self.language, None)
    }

    /// Localized message with arguments
    pub fn text_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.localization.get_message_with_args(key, &self.language, args)
    }

    /// Capability summary sent for `/help` and unexpected input
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sticker(&self, kind: StickerKind) -> Option<&str> {
        self.stickers.get(kind)
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}
