//! # Codec Tests
//!
//! Property tests for the CSV and JSON codecs and for the collection
//! operations the bot applies between upload and download.

use proptest::prelude::*;

use hotspots::codec::FileFormat;
use hotspots::wifi_list::{FilterKey, SortKey, WifiList};
use hotspots::wifi_model::{HeaderTranslationRow, WifiRecord};

// No surrounding whitespace: CSV fields are trimmed on read
const TEXT: &str = "[A-Za-zА-Яа-я0-9;\"._-]{0,12}";
const AREAS: [&str; 3] = ["ЦАО", "ВАО", "САО"];
const PARKS: [&str; 3] = ["CentralPark", "Sokolniki", "Izmailovo"];

fn coordinate() -> impl Strategy<Value = f64> {
    -180.0f64..180.0
}

fn wifi_record() -> impl Strategy<Value = WifiRecord> {
    (
        (any::<i64>(), TEXT, TEXT, 0..AREAS.len(), TEXT, 0..PARKS.len(), TEXT),
        (0i64..5, TEXT, TEXT, TEXT, coordinate(), coordinate(), TEXT, TEXT),
    )
        .prop_map(
            |(
                (id, global_id, name, adm, district, park, wifi_name),
                (coverage, function_flag, access_flag, password, longitude, latitude, center, area),
            )| WifiRecord {
                id,
                global_id,
                name,
                adm_area: AREAS[adm].to_string(),
                district,
                park_name: PARKS[park].to_string(),
                wifi_name,
                coverage_area: coverage * 10,
                function_flag,
                access_flag,
                password,
                longitude,
                latitude,
                geodata_center: center,
                geoarea: area,
            },
        )
}

fn wifi_list() -> impl Strategy<Value = WifiList> {
    prop::collection::vec(wifi_record(), 0..12).prop_map(WifiList::new)
}

proptest! {
    /// Test that reading a written file gives back the same collection
    #[test]
    fn test_round_trip(list in wifi_list()) {
        for format in [FileFormat::Csv, FileFormat::Json] {
            let bytes = format.codec().write(&list).unwrap();
            let read = format.codec().read(&bytes).unwrap();
            prop_assert_eq!(&read, &list);
            prop_assert_eq!(read.headers(), &HeaderTranslationRow);

            // Writing is deterministic
            prop_assert_eq!(format.codec().write(&read).unwrap(), bytes);
        }
    }

    /// Test sort order and stability
    #[test]
    fn test_sort_is_ordered_and_stable(list in wifi_list()) {
        let mut by_name = list.clone();
        by_name.sort(SortKey::Name);
        prop_assert_eq!(by_name.len(), list.len());
        prop_assert!(by_name.wifis().windows(2).all(|pair| pair[0].name <= pair[1].name));

        let mut by_coverage = list.clone();
        by_coverage.sort(SortKey::CoverageArea);
        for pair in by_coverage.wifis().windows(2) {
            prop_assert!(pair[0].coverage_area <= pair[1].coverage_area);
        }

        // Equal keys keep their original relative order
        for coverage in [0, 10, 20, 30, 40] {
            let before: Vec<&WifiRecord> =
                list.wifis().iter().filter(|w| w.coverage_area == coverage).collect();
            let after: Vec<&WifiRecord> =
                by_coverage.wifis().iter().filter(|w| w.coverage_area == coverage).collect();
            prop_assert_eq!(before, after);
        }
        prop_assert_eq!(by_coverage.headers(), list.headers());
    }

    /// Test that selection keeps exactly the matching records
    #[test]
    fn test_select_keeps_matches(list in wifi_list(), park in 0..PARKS.len()) {
        let mut selected = list.clone();
        selected.select(FilterKey::ParkName, PARKS[park]);

        let expected: Vec<WifiRecord> = list
            .wifis()
            .iter()
            .filter(|w| w.park_name == PARKS[park])
            .cloned()
            .collect();
        prop_assert_eq!(selected.wifis(), expected.as_slice());
        prop_assert!(selected.len() <= list.len());
    }

    /// Test that the combined filter is a conjunction regardless of order
    #[test]
    fn test_conjunctive_filter(list in wifi_list(), adm in 0..AREAS.len(), coverage in 0i64..5) {
        let coverage = (coverage * 10).to_string();

        let mut combined = list.clone();
        combined.select_adm_and_coverage(AREAS[adm], &coverage);

        let mut reversed = list.clone();
        reversed.select(FilterKey::CoverageArea, &coverage);
        reversed.select(FilterKey::AdmArea, AREAS[adm]);

        prop_assert_eq!(&combined, &reversed);
        prop_assert!(combined
            .wifis()
            .iter()
            .all(|w| w.adm_area == AREAS[adm] && w.coverage_area.to_string() == coverage));
    }
}

/// Test that a CSV file with a missing field is rejected as a whole
#[test]
fn test_csv_missing_field_rejects_file() {
    let list = WifiList::new(Vec::new());
    let mut bytes = FileFormat::Csv.codec().write(&list).unwrap();
    bytes.extend_from_slice("\"1\";\"2\";\"Точка\";\n".as_bytes());

    assert!(FileFormat::Csv.codec().read(&bytes).is_err());
}

/// Test that a JSON record with a null field is rejected
#[test]
fn test_json_null_field_rejects_file() {
    let record = serde_json::json!({
        "id": 1, "global_id": "1", "name": "n", "admArea": "ЦАО", "district": "d",
        "parkName": "p", "wifiName": "w", "coverageArea": 10, "functionFlag": "f",
        "accessFlag": "a", "password": null, "Longitude_WGS84": 37.5,
        "Latitude_WGS84": 55.5, "geodata_center": "c", "geoarea": "g"
    });
    let document = serde_json::json!({
        "russian_naming": serde_json::to_value(HeaderTranslationRow).unwrap(),
        "wifis": [record],
    });
    let bytes = serde_json::to_vec(&document).unwrap();

    let err = FileFormat::Json.codec().read(&bytes).unwrap_err();
    assert!(err.to_string().contains("password"));
}
