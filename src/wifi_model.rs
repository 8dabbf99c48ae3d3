//! # Wi-Fi Record Model
//!
//! This module defines one row of the Wi-Fi hotspot registry and the constant
//! row of Russian display names that travels with every exported file.
//!
//! ## Core Concepts
//!
//! - **WifiField**: the 15 registry columns in their fixed file order
//! - **WifiRecord**: one typed row, built from raw text or from a JSON object
//! - **HeaderTranslationRow**: the Russian column names, validated on read
//!
//! ## Usage
//!
//! ```rust
//! use hotspots::wifi_model::{WifiField, WifiRecord};
//!
//! let values = [
//!     "1", "861", "Wi-Fi in Gorky Park", "Central", "Yakimanka", "Gorky Park",
//!     "Moscow_WiFi_Free", "50", "active", "open", "none", "37.6", "55.7",
//!     "{}", "",
//! ];
//! let record = WifiRecord::from_values(&values).unwrap();
//! assert_eq!(record.value(WifiField::CoverageArea), "50");
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::wifi_errors::WifiError;

/// Number of columns in the registry schema
pub const FIELD_COUNT: usize = 15;

/// Columns of the registry, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WifiField {
    Id,
    GlobalId,
    Name,
    AdmArea,
    District,
    ParkName,
    WifiName,
    CoverageArea,
    FunctionFlag,
    AccessFlag,
    Password,
    Longitude,
    Latitude,
    GeodataCenter,
    Geoarea,
}

impl WifiField {
    /// All columns in file order
    pub const ALL: [WifiField; FIELD_COUNT] = [
        WifiField::Id,
        WifiField::GlobalId,
        WifiField::Name,
        WifiField::AdmArea,
        WifiField::District,
        WifiField::ParkName,
        WifiField::WifiName,
        WifiField::CoverageArea,
        WifiField::FunctionFlag,
        WifiField::AccessFlag,
        WifiField::Password,
        WifiField::Longitude,
        WifiField::Latitude,
        WifiField::GeodataCenter,
        WifiField::Geoarea,
    ];

    /// Column name used in the first line of CSV files
    pub fn csv_name(self) -> &'static str {
        match self {
            WifiField::Id => "ID",
            WifiField::GlobalId => "global_id",
            WifiField::Name => "Name",
            WifiField::AdmArea => "AdmArea",
            WifiField::District => "District",
            WifiField::ParkName => "ParkName",
            WifiField::WifiName => "WiFiName",
            WifiField::CoverageArea => "CoverageArea",
            WifiField::FunctionFlag => "FunctionFlag",
            WifiField::AccessFlag => "AccessFlag",
            WifiField::Password => "Password",
            WifiField::Longitude => "Longitude_WGS84",
            WifiField::Latitude => "Latitude_WGS84",
            WifiField::GeodataCenter => "geodata_center",
            WifiField::Geoarea => "geoarea",
        }
    }

    /// Key used for the column in JSON files
    pub fn json_key(self) -> &'static str {
        match self {
            WifiField::Id => "id",
            WifiField::GlobalId => "global_id",
            WifiField::Name => "name",
            WifiField::AdmArea => "admArea",
            WifiField::District => "district",
            WifiField::ParkName => "parkName",
            WifiField::WifiName => "wifiName",
            WifiField::CoverageArea => "coverageArea",
            WifiField::FunctionFlag => "functionFlag",
            WifiField::AccessFlag => "accessFlag",
            WifiField::Password => "password",
            WifiField::Longitude => "Longitude_WGS84",
            WifiField::Latitude => "Latitude_WGS84",
            WifiField::GeodataCenter => "geodata_center",
            WifiField::Geoarea => "geoarea",
        }
    }

    /// Russian display name carried by the header translation row
    pub fn russian_name(self) -> &'static str {
        match self {
            WifiField::Id => "Код",
            WifiField::GlobalId => "global_id",
            WifiField::Name => "Наименование",
            WifiField::AdmArea => "Административный округ по адресу",
            WifiField::District => "Район",
            WifiField::ParkName => "Наименование парка",
            WifiField::WifiName => "Имя Wi-Fi сети",
            WifiField::CoverageArea => "Зона покрытия (метры)",
            WifiField::FunctionFlag => "Признак функционирования",
            WifiField::AccessFlag => "Условия доступа",
            WifiField::Password => "Пароль",
            WifiField::Longitude => "Долгота в WGS-84",
            WifiField::Latitude => "Широта в WGS-84",
            WifiField::GeodataCenter => "geodata_center",
            WifiField::Geoarea => "geoarea",
        }
    }

    /// Position of the column in a row
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Render values as one quoted, `;`-terminated CSV line
pub(crate) fn csv_line<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for value in values {
        line.push('"');
        line.push_str(&value.as_ref().replace('"', "\"\""));
        line.push_str("\";");
    }
    line
}

/// One row of the Wi-Fi hotspot registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiRecord {
    pub id: i64,
    #[serde(rename = "global_id")]
    pub global_id: String,
    pub name: String,
    pub adm_area: String,
    pub district: String,
    pub park_name: String,
    pub wifi_name: String,
    /// Coverage radius in meters
    pub coverage_area: i64,
    pub function_flag: String,
    pub access_flag: String,
    pub password: String,
    #[serde(rename = "Longitude_WGS84")]
    pub longitude: f64,
    #[serde(rename = "Latitude_WGS84")]
    pub latitude: f64,
    #[serde(rename = "geodata_center")]
    pub geodata_center: String,
    pub geoarea: String,
}

fn parse_int(field: WifiField, raw: &str) -> Result<i64, WifiError> {
    raw.trim().parse().map_err(|_| WifiError::InvalidValue {
        field: field.csv_name(),
        value: raw.to_string(),
        kind: "integer",
    })
}

fn parse_coordinate(field: WifiField, raw: &str) -> Result<f64, WifiError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(WifiError::InvalidValue {
            field: field.csv_name(),
            value: raw.to_string(),
            kind: "coordinate",
        }),
    }
}

impl WifiRecord {
    /// Build a record from 15 raw values in column order.
    ///
    /// Coordinates must already use `.` as the decimal separator.
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Result<Self, WifiError> {
        if values.len() != FIELD_COUNT {
            return Err(WifiError::FieldCount {
                expected: FIELD_COUNT,
                found: values.len(),
            });
        }
        let text = |field: WifiField| values[field.index()].as_ref().to_string();

        Ok(Self {
            id: parse_int(WifiField::Id, values[WifiField::Id.index()].as_ref())?,
            global_id: text(WifiField::GlobalId),
            name: text(WifiField::Name),
            adm_area: text(WifiField::AdmArea),
            district: text(WifiField::District),
            park_name: text(WifiField::ParkName),
            wifi_name: text(WifiField::WifiName),
            coverage_area: parse_int(
                WifiField::CoverageArea,
                values[WifiField::CoverageArea.index()].as_ref(),
            )?,
            function_flag: text(WifiField::FunctionFlag),
            access_flag: text(WifiField::AccessFlag),
            password: text(WifiField::Password),
            longitude: parse_coordinate(
                WifiField::Longitude,
                values[WifiField::Longitude.index()].as_ref(),
            )?,
            latitude: parse_coordinate(
                WifiField::Latitude,
                values[WifiField::Latitude.index()].as_ref(),
            )?,
            geodata_center: text(WifiField::GeodataCenter),
            geoarea: text(WifiField::Geoarea),
        })
    }

    /// Build a record from a JSON object, matching keys case-insensitively.
    ///
    /// Absent and null columns are rejected with [`WifiError::MissingField`].
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, WifiError> {
        let text = |field: WifiField| -> Result<String, WifiError> {
            let value = lookup_json(object, field)?;
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid_json(field, value, "string"))
        };
        let int = |field: WifiField| -> Result<i64, WifiError> {
            let value = lookup_json(object, field)?;
            value
                .as_i64()
                .ok_or_else(|| invalid_json(field, value, "integer"))
        };
        let coordinate = |field: WifiField| -> Result<f64, WifiError> {
            let value = lookup_json(object, field)?;
            value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid_json(field, value, "coordinate"))
        };

        Ok(Self {
            id: int(WifiField::Id)?,
            global_id: text(WifiField::GlobalId)?,
            name: text(WifiField::Name)?,
            adm_area: text(WifiField::AdmArea)?,
            district: text(WifiField::District)?,
            park_name: text(WifiField::ParkName)?,
            wifi_name: text(WifiField::WifiName)?,
            coverage_area: int(WifiField::CoverageArea)?,
            function_flag: text(WifiField::FunctionFlag)?,
            access_flag: text(WifiField::AccessFlag)?,
            password: text(WifiField::Password)?,
            longitude: coordinate(WifiField::Longitude)?,
            latitude: coordinate(WifiField::Latitude)?,
            geodata_center: text(WifiField::GeodataCenter)?,
            geoarea: text(WifiField::Geoarea)?,
        })
    }

    /// Canonical string form of a column
    pub fn value(&self, field: WifiField) -> String {
        match field {
            WifiField::Id => self.id.to_string(),
            WifiField::GlobalId => self.global_id.clone(),
            WifiField::Name => self.name.clone(),
            WifiField::AdmArea => self.adm_area.clone(),
            WifiField::District => self.district.clone(),
            WifiField::ParkName => self.park_name.clone(),
            WifiField::WifiName => self.wifi_name.clone(),
            WifiField::CoverageArea => self.coverage_area.to_string(),
            WifiField::FunctionFlag => self.function_flag.clone(),
            WifiField::AccessFlag => self.access_flag.clone(),
            WifiField::Password => self.password.clone(),
            WifiField::Longitude => self.longitude.to_string(),
            WifiField::Latitude => self.latitude.to_string(),
            WifiField::GeodataCenter => self.geodata_center.clone(),
            WifiField::Geoarea => self.geoarea.clone(),
        }
    }

    /// One CSV line for the record
    pub fn to_csv(&self) -> String {
        csv_line(WifiField::ALL.iter().map(|field| self.value(*field)))
    }
}

/// Find a column in a JSON object regardless of key case
pub(crate) fn lookup_json(
    object: &Map<String, Value>,
    field: WifiField,
) -> Result<&Value, WifiError> {
    object
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(field.json_key()))
        .map(|(_, value)| value)
        .filter(|value| !value.is_null())
        .ok_or(WifiError::MissingField {
            field: field.json_key(),
        })
}

fn invalid_json(field: WifiField, value: &Value, kind: &'static str) -> WifiError {
    WifiError::InvalidValue {
        field: field.json_key(),
        value: value.to_string(),
        kind,
    }
}

/// Russian display names for the 15 registry columns.
///
/// A constant, not user data: every value comes from [`WifiField::russian_name`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderTranslationRow;

impl HeaderTranslationRow {
    /// Display name of a column
    pub fn value(&self, field: WifiField) -> &'static str {
        field.russian_name()
    }

    /// Display names in column order
    pub fn values(&self) -> impl Iterator<Item = &'static str> {
        WifiField::ALL.iter().map(|field| field.russian_name())
    }

    /// The translation row rendered as the second line of a CSV file
    pub fn to_csv(&self) -> String {
        csv_line(self.values())
    }

    /// Check that a JSON object carries exactly the expected translations
    pub fn validate_json(object: &Map<String, Value>) -> Result<Self, WifiError> {
        for field in WifiField::ALL {
            let value = lookup_json(object, field)?;
            if value.as_str() != Some(field.russian_name()) {
                return Err(WifiError::TranslationMismatch {
                    field: field.json_key(),
                });
            }
        }
        Ok(HeaderTranslationRow)
    }
}

impl Serialize for HeaderTranslationRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for field in WifiField::ALL {
            map.serialize_entry(field.json_key(), field.russian_name())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_values() -> Vec<&'static str> {
        vec![
            "7",
            "1074",
            "Точка 7",
            "Центральный административный округ",
            "район Якиманка",
            "Парк Горького",
            "Moscow_WiFi_Free",
            "80",
            "действует",
            "открытая сеть",
            "без пароля",
            "37.6012",
            "55.7281",
            "{type=Point}",
            "",
        ]
    }

    #[test]
    fn test_from_values_typed_fields() {
        let record = WifiRecord::from_values(&sample_values()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.coverage_area, 80);
        assert_eq!(record.longitude, 37.6012);
        assert_eq!(record.park_name, "Парк Горького");
        assert_eq!(record.geoarea, "");
    }

    #[test]
    fn test_from_values_rejects_wrong_count() {
        let values = sample_values();
        assert!(matches!(
            WifiRecord::from_values(&values[..14]),
            Err(WifiError::FieldCount { expected: 15, found: 14 })
        ));
    }

    #[test]
    fn test_from_values_rejects_bad_types() {
        let mut values = sample_values();
        values[7] = "wide";
        assert!(matches!(
            WifiRecord::from_values(&values),
            Err(WifiError::InvalidValue { field: "CoverageArea", .. })
        ));

        let mut values = sample_values();
        values[11] = "NaN";
        assert!(WifiRecord::from_values(&values).is_err());
    }

    #[test]
    fn test_csv_line_is_quoted_with_trailing_delimiter() {
        let record = WifiRecord::from_values(&sample_values()).unwrap();
        let line = record.to_csv();
        assert!(line.starts_with("\"7\";\"1074\";"));
        assert!(line.ends_with("\"{type=Point}\";\"\";"));
        assert_eq!(line.matches(';').count(), FIELD_COUNT);
    }

    #[test]
    fn test_json_keys_are_case_insensitive() {
        let value = json!({
            "ID": 1, "GLOBAL_ID": "g", "Name": "n", "admarea": "a", "district": "d",
            "parkName": "p", "wifiName": "w", "coverageArea": 10, "functionFlag": "f",
            "accessFlag": "x", "password": "", "longitude_wgs84": 37.5,
            "Latitude_WGS84": 55, "geodata_center": "", "geoarea": ""
        });
        let record = WifiRecord::from_json_object(value.as_object().unwrap()).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.latitude, 55.0);
    }

    #[test]
    fn test_json_missing_field_is_named() {
        let value = json!({ "id": 1, "global_id": "g" });
        let err = WifiRecord::from_json_object(value.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, WifiError::MissingField { field: "name" }));
    }

    #[test]
    fn test_json_null_counts_as_missing() {
        let record = WifiRecord::from_values(&sample_values()).unwrap();
        let mut value = serde_json::to_value(&record).unwrap();
        value["parkName"] = Value::Null;
        let err = WifiRecord::from_json_object(value.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, WifiError::MissingField { field: "parkName" }));
    }

    #[test]
    fn test_translation_row_serializes_in_column_order() {
        let value = serde_json::to_string(&HeaderTranslationRow).unwrap();
        assert!(value.starts_with("{\"id\":\"Код\",\"global_id\":\"global_id\""));
        assert!(value.ends_with("\"geoarea\":\"geoarea\"}"));
    }

    #[test]
    fn test_translation_row_validation() {
        let good = serde_json::to_value(HeaderTranslationRow).unwrap();
        assert!(HeaderTranslationRow::validate_json(good.as_object().unwrap()).is_ok());

        let mut bad = good.clone();
        bad["name"] = json!("Name");
        assert!(matches!(
            HeaderTranslationRow::validate_json(bad.as_object().unwrap()),
            Err(WifiError::TranslationMismatch { field: "name" })
        ));
    }
}
