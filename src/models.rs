use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to specify dates in API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    /// Single year like 2020
    Year(i32),
    /// Inclusive range like 2000..=2020
    Range { start: i32, end: i32 },
}

impl DateSpec {
    pub fn to_query_param(&self) -> String {
        match *self {
            DateSpec::Year(y) => y.to_string(),
            DateSpec::Range { start, end } => format!("{}:{}", start, end),
        }
    }
}

/// One raw observation as found in a page: country and year identify the
/// record, `value` is kept as the wire string. An empty string means
/// "not reported" and must be dropped, never coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    pub country: String,
    pub year: i32,
    pub value: String,
}

/// One page of an indicator response: the total page count the API declared
/// on the root element, plus the records carried by this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPage {
    pub pages: u32,
    pub records: Vec<DataRecord>,
}

/// Join key for indicator series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub year: i32,
    pub country: String,
}

impl SeriesKey {
    pub fn new(year: i32, country: impl Into<String>) -> Self {
        Self {
            year,
            country: country.into(),
        }
    }
}

/// A fully-built indicator series: (year, country) -> unit-tagged value.
pub type Series<U> = HashMap<SeriesKey, U>;

/// Numeric value carrying its unit in the type.
pub trait UnitValue: Copy {
    fn from_raw(v: f64) -> Self;
    fn raw(self) -> f64;
}

/// An area in square kilometres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SquareKm(pub f64);

/// A percentage (0–100 as returned by the API; values are trusted as-is).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Percent(pub f64);

impl UnitValue for SquareKm {
    fn from_raw(v: f64) -> Self {
        SquareKm(v)
    }
    fn raw(self) -> f64 {
        self.0
    }
}

impl UnitValue for Percent {
    fn from_raw(v: f64) -> Self {
        Percent(v)
    }
    fn raw(self) -> f64 {
        self.0
    }
}
