//! Turn fetched pages into joinable series.
//!
//! Extraction and series building are split on purpose: records cross this
//! boundary as raw strings so that multiple date-range fetches of the same
//! indicator can be concatenated before any numeric parsing happens.

use crate::models::{DataRecord, IndicatorPage, Series, SeriesKey, UnitValue};
use thiserror::Error;

/// A non-empty value string that does not parse as a number. Wire values are
/// plain decimals; anything else is a fault, not a zero.
#[derive(Debug, Error)]
#[error("invalid numeric value {value:?} for {country} / {year}")]
pub struct SeriesError {
    pub country: String,
    pub year: i32,
    pub value: String,
}

/// Flatten pages into raw (country, year, value) records, dropping records
/// whose value string is empty. Empty means "not reported", not zero.
pub fn extract_records(pages: &[IndicatorPage]) -> Vec<DataRecord> {
    pages
        .iter()
        .flat_map(|p| p.records.iter())
        .filter(|r| !r.value.is_empty())
        .cloned()
        .collect()
}

/// Parse surviving value strings and build the (year, country) lookup table,
/// tagging each value with the unit type `U`.
///
/// Keys are expected to be unique since they derive 1:1 from source records,
/// but duplicates are tolerated: the last-processed record wins.
pub fn build_series<U: UnitValue>(records: &[DataRecord]) -> Result<Series<U>, SeriesError> {
    let mut out = Series::with_capacity(records.len());
    for r in records {
        let v: f64 = r.value.parse().map_err(|_| SeriesError {
            country: r.country.clone(),
            year: r.year,
            value: r.value.clone(),
        })?;
        out.insert(SeriesKey::new(r.year, r.country.clone()), U::from_raw(v));
    }
    Ok(out)
}
