//! Failures of a session transition.
//!
//! Everything except [`SessionError::Internal`] is an expected rejection: the
//! user gets an explanation and the uploaded data stays as it was.
//! `Internal` resets the whole session.

use thiserror::Error;

use crate::wifi_errors::WifiError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Wrong extension, broken layout or values in an uploaded file
    #[error("malformed upload: {0}")]
    MalformedUpload(#[from] WifiError),

    /// Sort, filter or download requested before any successful upload
    #[error("no data has been uploaded")]
    NoDataAvailable,

    /// Filter reply in the wrong shape
    #[error("invalid filter input: {0}")]
    InvalidFilterInput(String),

    /// Callback data that maps to no action
    #[error("unroutable action `{0}`")]
    UnroutableAction(String),

    /// Anything unanticipated, messenger failures included
    #[error("internal failure: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SessionError {
    /// Localization key of the message shown to the user
    pub fn message_key(&self) -> &'static str {
        match self {
            SessionError::MalformedUpload(_) => "upload-failed",
            SessionError::NoDataAvailable => "error-no-data",
            SessionError::InvalidFilterInput(_) => "filter-invalid",
            SessionError::UnroutableAction(_) => "error-action-impossible",
            SessionError::Internal(_) => "bot-description",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, SessionError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: SessionError = WifiError::MissingKey("wifis").into();
        assert!(matches!(err, SessionError::MalformedUpload(_)));
        assert_eq!(err.message_key(), "upload-failed");

        let err: SessionError = anyhow::anyhow!("network down").into();
        assert!(err.is_internal());
        assert!(err.to_string().contains("network down"));
    }
}
