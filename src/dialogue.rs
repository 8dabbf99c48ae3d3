//! Conversation state for one chat and the inputs that drive it.

use teloxide::types::MessageId;

use crate::codec::FileFormat;
use crate::wifi_list::{SortKey, WifiList};

/// What input the session expects next
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingAction {
    #[default]
    None,
    AwaitingUploadJson,
    AwaitingUploadCsv,
    AwaitingFilterCoverageArea,
    AwaitingFilterParkName,
    AwaitingFilterAdmAndCoverage,
}

impl PendingAction {
    pub fn awaiting_upload(format: FileFormat) -> Self {
        match format {
            FileFormat::Json => PendingAction::AwaitingUploadJson,
            FileFormat::Csv => PendingAction::AwaitingUploadCsv,
        }
    }

    /// Format of the document the session is waiting for
    pub fn upload_format(self) -> Option<FileFormat> {
        match self {
            PendingAction::AwaitingUploadJson => Some(FileFormat::Json),
            PendingAction::AwaitingUploadCsv => Some(FileFormat::Csv),
            _ => None,
        }
    }

    /// Filter the session is waiting for a reply to
    pub fn filter_request(self) -> Option<FilterRequest> {
        match self {
            PendingAction::AwaitingFilterCoverageArea => Some(FilterRequest::CoverageArea),
            PendingAction::AwaitingFilterParkName => Some(FilterRequest::ParkName),
            PendingAction::AwaitingFilterAdmAndCoverage => Some(FilterRequest::AdmAndCoverageArea),
            _ => None,
        }
    }
}

/// Prompt message the user must reply to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwaitedReply {
    pub message_id: MessageId,
    /// Text of the prompt as sent, already escaped
    pub prompt: String,
}

/// Everything one chat's session owns
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub pending_action: PendingAction,
    pub last_collection: Option<WifiList>,
    pub awaited_reply: Option<AwaitedReply>,
}

impl SessionState {
    /// Back to the initial state, uploaded data included
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Stop waiting for any input, keeping the uploaded data
    pub fn clear_pending(&mut self) {
        self.pending_action = PendingAction::None;
        self.awaited_reply = None;
    }
}

/// Text commands understood by the bot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Upload,
    Download,
    Sort,
    Filter,
}

impl Command {
    /// Parse a command, ignoring a trailing `@botname`
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim();
        let word = word.split_once('@').map_or(word, |(command, _)| command);
        match word {
            "/help" => Some(Command::Help),
            "/upload" => Some(Command::Upload),
            "/download" => Some(Command::Download),
            "/sort" => Some(Command::Sort),
            "/filter" => Some(Command::Filter),
            _ => None,
        }
    }
}

/// Filters offered by the `/filter` keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterRequest {
    CoverageArea,
    ParkName,
    AdmAndCoverageArea,
}

impl FilterRequest {
    pub fn pending_action(self) -> PendingAction {
        match self {
            FilterRequest::CoverageArea => PendingAction::AwaitingFilterCoverageArea,
            FilterRequest::ParkName => PendingAction::AwaitingFilterParkName,
            FilterRequest::AdmAndCoverageArea => PendingAction::AwaitingFilterAdmAndCoverage,
        }
    }
}

/// Inline keyboard actions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    Upload(FileFormat),
    Download(FileFormat),
    Sort(SortKey),
    Filter(FilterRequest),
}

impl CallbackAction {
    pub const ALL: [CallbackAction; 9] = [
        CallbackAction::Upload(FileFormat::Json),
        CallbackAction::Upload(FileFormat::Csv),
        CallbackAction::Download(FileFormat::Json),
        CallbackAction::Download(FileFormat::Csv),
        CallbackAction::Sort(SortKey::Name),
        CallbackAction::Sort(SortKey::CoverageArea),
        CallbackAction::Filter(FilterRequest::CoverageArea),
        CallbackAction::Filter(FilterRequest::ParkName),
        CallbackAction::Filter(FilterRequest::AdmAndCoverageArea),
    ];

    /// Callback data carried by the keyboard button
    pub fn data(self) -> &'static str {
        match self {
            CallbackAction::Upload(FileFormat::Json) => "UploadJson",
            CallbackAction::Upload(FileFormat::Csv) => "UploadCsv",
            CallbackAction::Download(FileFormat::Json) => "DownloadJson",
            CallbackAction::Download(FileFormat::Csv) => "DownloadCsv",
            CallbackAction::Sort(SortKey::Name) => "NameSort",
            CallbackAction::Sort(SortKey::CoverageArea) => "CoverageAreaSort",
            CallbackAction::Filter(FilterRequest::CoverageArea) => "CoverageAreaFilter",
            CallbackAction::Filter(FilterRequest::ParkName) => "ParkNameFilter",
            CallbackAction::Filter(FilterRequest::AdmAndCoverageArea) => "AdmAndCoverageAreaFilter",
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.data() == data)
    }
}

/// Split the two-line reply of the combined filter into (AdmArea, CoverageArea).
///
/// The reply is positional: the first line is the area, the second the coverage.
pub fn split_adm_and_coverage(text: &str) -> Result<(&str, &str), &'static str> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    match lines.as_slice() {
        [adm_area, coverage_area] => Ok((*adm_area, *coverage_area)),
        _ => Err("line_count"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse(" /sort "), Some(Command::Sort));
        assert_eq!(Command::parse("/filter@hotspots_bot"), Some(Command::Filter));
        assert_eq!(Command::parse("/start"), None);
        assert_eq!(Command::parse("upload"), None);
    }

    #[test]
    fn test_callback_data_round_trip() {
        for action in CallbackAction::ALL {
            assert_eq!(CallbackAction::parse(action.data()), Some(action));
        }
        assert_eq!(CallbackAction::parse("DistrictSort"), None);
        assert_eq!(CallbackAction::parse(""), None);
    }

    #[test]
    fn test_split_adm_and_coverage() {
        assert_eq!(split_adm_and_coverage("ЦАО\n50"), Ok(("ЦАО", "50")));
        assert_eq!(split_adm_and_coverage("ЦАО\r\n50"), Ok(("ЦАО", "50")));
        assert!(split_adm_and_coverage("ЦАО").is_err());
        assert!(split_adm_and_coverage("ЦАО\n50\n").is_err());
        assert!(split_adm_and_coverage("a\nb\nc").is_err());
    }

    #[test]
    fn test_pending_action_mapping() {
        assert_eq!(PendingAction::default(), PendingAction::None);
        assert_eq!(
            PendingAction::awaiting_upload(FileFormat::Csv).upload_format(),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            FilterRequest::ParkName.pending_action().filter_request(),
            Some(FilterRequest::ParkName)
        );
        assert_eq!(PendingAction::None.filter_request(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SessionState {
            pending_action: PendingAction::AwaitingFilterParkName,
            last_collection: Some(WifiList::default()),
            awaited_reply: Some(AwaitedReply {
                message_id: MessageId(5),
                prompt: "prompt".to_string(),
            }),
        };
        state.clear_pending();
        assert!(state.last_collection.is_some());
        assert_eq!(state.awaited_reply, None);

        state.reset();
        assert!(state.last_collection.is_none());
        assert_eq!(state.pending_action, PendingAction::None);
    }
}
