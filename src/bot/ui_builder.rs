//! UI Builder module for creating keyboards and formatting messages

use teloxide::utils::markdown;

use super::messenger::ChoiceButton;

// Import settings
use crate::config::BotSettings;

// Import dialogue types
use crate::codec::FileFormat;
use crate::dialogue::{CallbackAction, FilterRequest};
use crate::wifi_list::SortKey;

/// Escape plain text for MarkdownV2
pub fn escape(text: &str) -> String {
    markdown::escape(text)
}

/// Mark a filter prompt as answered
pub fn answered_prompt(prompt: &str) -> String {
    format!("{} ✅", prompt)
}

fn button(label: &str, action: CallbackAction) -> ChoiceButton {
    ChoiceButton::new(label, action.data())
}

/// Keyboard offering json and csv for the given direction
fn format_keyboard(upload: bool) -> Vec<Vec<ChoiceButton>> {
    let action = |format| {
        if upload {
            CallbackAction::Upload(format)
        } else {
            CallbackAction::Download(format)
        }
    };
    vec![vec![
        button(FileFormat::Json.extension(), action(FileFormat::Json)),
        button(FileFormat::Csv.extension(), action(FileFormat::Csv)),
    ]]
}

pub fn create_upload_keyboard() -> Vec<Vec<ChoiceButton>> {
    format_keyboard(true)
}

pub fn create_download_keyboard() -> Vec<Vec<ChoiceButton>> {
    format_keyboard(false)
}

pub fn create_sort_keyboard() -> Vec<Vec<ChoiceButton>> {
    vec![vec![
        button("Name", CallbackAction::Sort(SortKey::Name)),
        button("CoverageArea", CallbackAction::Sort(SortKey::CoverageArea)),
    ]]
}

/// One filter per row, the combined filter last
pub fn create_filter_keyboard(settings: &BotSettings) -> Vec<Vec<ChoiceButton>> {
    vec![
        vec![button(
            "CoverageArea",
            CallbackAction::Filter(FilterRequest::CoverageArea),
        )],
        vec![button("ParkName", CallbackAction::Filter(FilterRequest::ParkName))],
        vec![button(
            &settings.text("button-adm-and-coverage"),
            CallbackAction::Filter(FilterRequest::AdmAndCoverageArea),
        )],
    ]
}

/// Prompt the user must reply to, as ready-to-send MarkdownV2.
///
/// The emphasis lives in the message resources; only the field name is escaped.
pub fn filter_prompt(settings: &BotSettings, request: FilterRequest) -> String {
    let field = match request {
        FilterRequest::CoverageArea => "CoverageArea",
        FilterRequest::ParkName => "ParkName",
        FilterRequest::AdmAndCoverageArea => return settings.text("filter-prompt-combined"),
    };
    let field = escape(field);
    settings.text_args("filter-prompt", &[("field", field.as_str())])
}
