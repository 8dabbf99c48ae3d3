//! # CSV Codec
//!
//! Registry files are UTF-8, `;`-delimited, every value double-quoted and
//! every line terminated by a trailing delimiter:
//!
//! 1. the fixed English header,
//! 2. the header translation row,
//! 3. one line per record.
//!
//! Coordinates are written with a `.` decimal point and accepted with either
//! `.` or `,` on read.

use std::sync::LazyLock;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::codec::WifiCodec;
use crate::wifi_errors::WifiError;
use crate::wifi_list::WifiList;
use crate::wifi_model::{csv_line, HeaderTranslationRow, WifiField, WifiRecord, FIELD_COUNT};

/// First line of every registry CSV file
pub static CSV_HEADER: LazyLock<String> =
    LazyLock::new(|| csv_line(WifiField::ALL.iter().map(|field| field.csv_name())));

const DELIMITER: u8 = b';';

/// Split off the next line, without its terminator
fn next_line<'a>(rest: &mut &'a str) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }
    let (line, tail) = match rest.find('\n') {
        Some(end) => (&rest[..end], &rest[end + 1..]),
        None => (*rest, ""),
    };
    *rest = tail;
    Some(line.strip_suffix('\r').unwrap_or(line))
}

/// Build a record from one split CSV row (15 values plus the trailing empty slot)
fn form_wifi(fields: &csv::StringRecord) -> Result<WifiRecord, WifiError> {
    if fields.len() != FIELD_COUNT + 1 {
        return Err(WifiError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len().saturating_sub(1),
        });
    }
    let mut values: Vec<String> = fields.iter().take(FIELD_COUNT).map(str::to_string).collect();
    for field in [WifiField::Longitude, WifiField::Latitude] {
        values[field.index()] = values[field.index()].replace(',', ".");
    }
    WifiRecord::from_values(&values)
}

/// CSV reader and writer for [`WifiList`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvProcessing;

impl WifiCodec for CsvProcessing {
    fn read(&self, bytes: &[u8]) -> Result<WifiList, WifiError> {
        let text = std::str::from_utf8(bytes)?;
        let mut rest = text.strip_prefix('\u{feff}').unwrap_or(text);

        if next_line(&mut rest) != Some(CSV_HEADER.as_str()) {
            return Err(WifiError::HeaderMismatch { line: 1 });
        }
        if next_line(&mut rest) != Some(HeaderTranslationRow.to_csv().as_str()) {
            return Err(WifiError::HeaderMismatch { line: 2 });
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rest.as_bytes());

        let mut wifis = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row_number = index + 1;
            let fields = row.map_err(|e| WifiError::from(e).at_row(row_number))?;
            // Whitespace-only line; a row of empty quoted values is still a row
            if fields.len() == 1 && fields.iter().all(str::is_empty) {
                continue;
            }
            wifis.push(form_wifi(&fields).map_err(|e| e.at_row(row_number))?);
        }

        debug!(records = wifis.len(), "CSV registry parsed");
        Ok(WifiList::new(wifis))
    }

    fn write(&self, list: &WifiList) -> Result<Vec<u8>, WifiError> {
        let mut text = String::with_capacity(CSV_HEADER.len() * (list.len() + 2));
        text.push_str(&CSV_HEADER);
        text.push('\n');
        for entry in list {
            text.push_str(&entry.to_csv());
            text.push('\n');
        }
        Ok(text.into_bytes())
    }
}
