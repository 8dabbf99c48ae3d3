//! # Wi-Fi Registry Error Types
//!
//! Errors raised while building records or translating a registry file
//! between bytes and a [`WifiList`](crate::wifi_list::WifiList).
//! Every variant means the input was rejected as a whole.

use thiserror::Error;

/// Errors for record construction and file codecs
#[derive(Debug, Error)]
pub enum WifiError {
    /// The uploaded file name does not carry the expected extension
    #[error("file `{file_name}` is not a .{expected} file")]
    WrongExtension {
        file_name: String,
        expected: &'static str,
    },

    /// One of the two fixed header lines of a CSV file does not match
    #[error("header line {line} does not match the registry layout")]
    HeaderMismatch { line: usize },

    /// The header translation row of a JSON file carries a foreign value
    #[error("header translation for `{field}` does not match the registry layout")]
    TranslationMismatch { field: &'static str },

    /// A row does not have one value per column
    #[error("expected {expected} values, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A value could not be coerced into the column type
    #[error("value `{value}` of `{field}` is not a valid {kind}")]
    InvalidValue {
        field: &'static str,
        value: String,
        kind: &'static str,
    },

    /// A deserialized record is missing a column or holds null
    #[error("field `{field}` is missing or null")]
    MissingField { field: &'static str },

    /// A top-level JSON key is absent
    #[error("document has no `{0}` key")]
    MissingKey(&'static str),

    /// The JSON document does not have the expected shape
    #[error("unexpected document shape: {0}")]
    Shape(String),

    /// Sort or select requested on a column that does not support it
    #[error("column `{0}` cannot be used for this operation")]
    UnsupportedField(&'static str),

    /// Context wrapper pointing at the offending data row (1-based)
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<WifiError>,
    },

    /// The document could not be fetched from the messenger
    #[error("document download failed: {0}")]
    Download(String),

    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WifiError {
    /// Attach the data row number to an error
    pub fn at_row(self, row: usize) -> Self {
        WifiError::Row {
            row,
            source: Box::new(self),
        }
    }
}
