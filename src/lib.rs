//! # Hotspots Telegram Bot
//!
//! A Telegram bot that loads the Moscow park Wi-Fi hotspot registry from
//! CSV or JSON files, sorts and filters it per chat and sends the result back
//! in either format.

pub mod bot;
pub mod codec;
pub mod config;
pub mod csv_processing;
pub mod dialogue;
pub mod json_processing;
pub mod localization;
pub mod session_errors;
pub mod wifi_errors;
pub mod wifi_list;
pub mod wifi_model;
