//! # JSON Codec
//!
//! A registry JSON file is one object with two keys: `russian_naming` holds
//! the header translation row and `wifis` holds the records. Output is
//! pretty-printed with non-ASCII text left unescaped; keys are matched
//! case-insensitively on read.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::WifiCodec;
use crate::wifi_errors::WifiError;
use crate::wifi_list::WifiList;
use crate::wifi_model::{HeaderTranslationRow, WifiRecord};

/// Key of the header translation row
pub const HEADERS_KEY: &str = "russian_naming";
/// Key of the record array
pub const RECORDS_KEY: &str = "wifis";

#[derive(Serialize)]
struct WifiListDocument<'a> {
    russian_naming: &'a HeaderTranslationRow,
    wifis: &'a [WifiRecord],
}

fn lookup_key<'a>(object: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, WifiError> {
    object
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
        .filter(|value| !value.is_null())
        .ok_or(WifiError::MissingKey(key))
}

/// JSON reader and writer for [`WifiList`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProcessing;

impl WifiCodec for JsonProcessing {
    fn read(&self, bytes: &[u8]) -> Result<WifiList, WifiError> {
        let document: Value = serde_json::from_slice(bytes)?;
        let root = document
            .as_object()
            .ok_or_else(|| WifiError::Shape("top level is not an object".to_string()))?;

        let headers = lookup_key(root, HEADERS_KEY)?
            .as_object()
            .ok_or_else(|| WifiError::Shape(format!("`{HEADERS_KEY}` is not an object")))?;
        HeaderTranslationRow::validate_json(headers)?;

        let records = lookup_key(root, RECORDS_KEY)?
            .as_array()
            .ok_or_else(|| WifiError::Shape(format!("`{RECORDS_KEY}` is not an array")))?;

        let wifis = records
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_object()
                    .ok_or_else(|| WifiError::Shape("record is not an object".to_string()))
                    .and_then(WifiRecord::from_json_object)
                    .map_err(|e| e.at_row(index + 1))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = wifis.len(), "JSON registry parsed");
        Ok(WifiList::new(wifis))
    }

    fn write(&self, list: &WifiList) -> Result<Vec<u8>, WifiError> {
        let document = WifiListDocument {
            russian_naming: list.headers(),
            wifis: list.wifis(),
        };
        Ok(serde_json::to_vec_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json(id: i64, park: &str) -> Value {
        json!({
            "id": id,
            "global_id": format!("g{id}"),
            "name": format!("Точка {id}"),
            "admArea": "ЦАО",
            "district": "Якиманка",
            "parkName": park,
            "wifiName": "Moscow_WiFi_Free",
            "coverageArea": 50,
            "functionFlag": "действует",
            "accessFlag": "открытая",
            "password": "",
            "Longitude_WGS84": 37.6,
            "Latitude_WGS84": 55.7,
            "geodata_center": "",
            "geoarea": ""
        })
    }

    fn document(records: Vec<Value>) -> Vec<u8> {
        let value = json!({
            "russian_naming": serde_json::to_value(HeaderTranslationRow).unwrap(),
            "wifis": records,
        });
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_read_document() {
        let bytes = document(vec![record_json(1, "Сокольники"), record_json(2, "Парк Горького")]);
        let list = JsonProcessing.read(&bytes).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.wifis()[1].park_name, "Парк Горького");
    }

    #[test]
    fn test_read_top_level_keys_ignore_case() {
        let value = json!({
            "Russian_Naming": serde_json::to_value(HeaderTranslationRow).unwrap(),
            "WIFIS": [record_json(1, "p")],
        });
        let list = JsonProcessing.read(value.to_string().as_bytes()).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_read_rejects_record_with_missing_field() {
        let mut broken = record_json(2, "p");
        broken.as_object_mut().unwrap().remove("district");
        let bytes = document(vec![record_json(1, "p"), broken]);
        let err = JsonProcessing.read(&bytes).unwrap_err();
        assert_eq!(err.to_string(), "row 2: field `district` is missing or null");
    }

    #[test]
    fn test_read_rejects_bad_shapes() {
        assert!(matches!(
            JsonProcessing.read(b"[]"),
            Err(WifiError::Shape(_))
        ));
        assert!(matches!(
            JsonProcessing.read(b"{\"wifis\": []}"),
            Err(WifiError::MissingKey(HEADERS_KEY))
        ));
        assert!(matches!(JsonProcessing.read(b"{not json"), Err(WifiError::Json(_))));
    }

    #[test]
    fn test_write_is_pretty_and_unescaped() {
        let bytes = document(vec![record_json(1, "Парк Горького")]);
        let list = JsonProcessing.read(&bytes).unwrap();
        let written = String::from_utf8(JsonProcessing.write(&list).unwrap()).unwrap();

        assert!(written.starts_with("{\n  \"russian_naming\": {\n    \"id\": \"Код\""));
        assert!(written.contains("\"parkName\": \"Парк Горького\""));
        assert!(written.contains("\"Longitude_WGS84\": 37.6"));
        assert!(!written.contains("\\u"));

        assert_eq!(JsonProcessing.read(written.as_bytes()).unwrap(), list);
        // Deterministic output
        assert_eq!(JsonProcessing.write(&list).unwrap(), written.into_bytes());
    }

    #[test]
    fn test_coordinates_survive_write_and_read() {
        let bytes = document(vec![record_json(1, "p")]);
        let mut list = JsonProcessing.read(&bytes).unwrap();
        let mut wifis = list.wifis().to_vec();
        // Full-precision values that need an exact decimal parse
        wifis[0].longitude = 37.782575101315956;
        wifis[0].latitude = 55.044744229869615;
        list = WifiList::new(wifis);

        let read = JsonProcessing.read(&JsonProcessing.write(&list).unwrap()).unwrap();
        assert_eq!(read.wifis()[0].longitude.to_bits(), 37.782575101315956f64.to_bits());
        assert_eq!(read.wifis()[0].latitude.to_bits(), 55.044744229869615f64.to_bits());
        assert_eq!(read, list);
    }
}
