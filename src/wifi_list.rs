//! # Wi-Fi Record Collection
//!
//! Ordered registry rows plus the header translation row. Sorting and
//! selection replace the row sequence in one step; the translation row is
//! never touched and always comes first when the collection is iterated.

use std::iter;

use crate::wifi_errors::WifiError;
use crate::wifi_model::{HeaderTranslationRow, WifiField, WifiRecord};

/// Columns the collection can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    CoverageArea,
}

/// Columns the collection can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    CoverageArea,
    ParkName,
    AdmArea,
}

impl TryFrom<WifiField> for SortKey {
    type Error = WifiError;

    fn try_from(field: WifiField) -> Result<Self, Self::Error> {
        match field {
            WifiField::Name => Ok(SortKey::Name),
            WifiField::CoverageArea => Ok(SortKey::CoverageArea),
            other => Err(WifiError::UnsupportedField(other.csv_name())),
        }
    }
}

impl TryFrom<WifiField> for FilterKey {
    type Error = WifiError;

    fn try_from(field: WifiField) -> Result<Self, Self::Error> {
        match field {
            WifiField::CoverageArea => Ok(FilterKey::CoverageArea),
            WifiField::ParkName => Ok(FilterKey::ParkName),
            WifiField::AdmArea => Ok(FilterKey::AdmArea),
            other => Err(WifiError::UnsupportedField(other.csv_name())),
        }
    }
}

impl FilterKey {
    fn matches(self, record: &WifiRecord, value: &str) -> bool {
        match self {
            FilterKey::CoverageArea => record.coverage_area.to_string() == value,
            FilterKey::ParkName => record.park_name == value,
            FilterKey::AdmArea => record.adm_area == value,
        }
    }
}

/// One element yielded when iterating a [`WifiList`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WifiListEntry<'a> {
    Headers(&'a HeaderTranslationRow),
    Record(&'a WifiRecord),
}

impl WifiListEntry<'_> {
    /// The entry as one CSV line
    pub fn to_csv(&self) -> String {
        match self {
            WifiListEntry::Headers(headers) => headers.to_csv(),
            WifiListEntry::Record(record) => record.to_csv(),
        }
    }
}

/// Collection of registry rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WifiList {
    headers: HeaderTranslationRow,
    wifis: Vec<WifiRecord>,
}

impl WifiList {
    pub fn new(wifis: Vec<WifiRecord>) -> Self {
        Self {
            headers: HeaderTranslationRow,
            wifis,
        }
    }

    pub fn headers(&self) -> &HeaderTranslationRow {
        &self.headers
    }

    /// Registry rows in current order
    pub fn wifis(&self) -> &[WifiRecord] {
        &self.wifis
    }

    pub fn len(&self) -> usize {
        self.wifis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wifis.is_empty()
    }

    /// The translation row first, then every record in current order
    pub fn iter(&self) -> impl Iterator<Item = WifiListEntry<'_>> + '_ {
        iter::once(WifiListEntry::Headers(&self.headers))
            .chain(self.wifis.iter().map(WifiListEntry::Record))
    }

    /// Stable ascending sort by the given column
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.wifis.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::CoverageArea => self.wifis.sort_by_key(|wifi| wifi.coverage_area),
        }
    }

    /// Keep only the records whose column equals `value` exactly.
    ///
    /// An empty result is valid.
    pub fn select(&mut self, key: FilterKey, value: &str) {
        self.wifis.retain(|wifi| key.matches(wifi, value));
    }

    /// Keep the records matching both the administrative area and the coverage
    pub fn select_adm_and_coverage(&mut self, adm_area: &str, coverage_area: &str) {
        self.select(FilterKey::AdmArea, adm_area);
        self.select(FilterKey::CoverageArea, coverage_area);
    }
}

impl<'a> IntoIterator for &'a WifiList {
    type Item = WifiListEntry<'a>;
    type IntoIter = Box<dyn Iterator<Item = WifiListEntry<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
