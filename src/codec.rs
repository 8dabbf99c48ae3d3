//! File formats the bot accepts and produces.

use crate::csv_processing::CsvProcessing;
use crate::json_processing::JsonProcessing;
use crate::wifi_errors::WifiError;
use crate::wifi_list::WifiList;

/// Stateless translator between a byte buffer and a [`WifiList`]
pub trait WifiCodec: Send + Sync {
    /// Parse a whole file; any malformed part rejects the file
    fn read(&self, bytes: &[u8]) -> Result<WifiList, WifiError>;

    /// Render the collection, translation row included
    fn write(&self, list: &WifiList) -> Result<Vec<u8>, WifiError>;
}

/// Registry file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Csv => "csv",
        }
    }

    /// Name of the file sent back on download
    pub fn result_file_name(self) -> String {
        format!("result.{}", self.extension())
    }

    pub fn codec(self) -> &'static dyn WifiCodec {
        match self {
            FileFormat::Json => &JsonProcessing,
            FileFormat::Csv => &CsvProcessing,
        }
    }

    /// Reject file names that do not end in `.<extension>` (ASCII case ignored)
    pub fn check_file_name(self, file_name: &str) -> Result<(), WifiError> {
        let suffix = format!(".{}", self.extension());
        let matches = file_name.len() > suffix.len()
            && file_name
                .get(file_name.len() - suffix.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));
        if matches {
            Ok(())
        } else {
            Err(WifiError::WrongExtension {
                file_name: file_name.to_string(),
                expected: self.extension(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_check() {
        assert!(FileFormat::Json.check_file_name("parks.json").is_ok());
        assert!(FileFormat::Json.check_file_name("PARKS.JSON").is_ok());
        assert!(FileFormat::Json.check_file_name("parks.csv").is_err());
        assert!(FileFormat::Csv.check_file_name(".csv").is_err());
        assert!(FileFormat::Csv.check_file_name("данные.csv").is_ok());
    }

    #[test]
    fn test_result_file_names() {
        assert_eq!(FileFormat::Csv.result_file_name(), "result.csv");
        assert_eq!(FileFormat::Json.result_file_name(), "result.json");
    }
}
