//! forest_cover
//!
//! A lightweight Rust library for estimating forested area from World Bank
//! indicator data. Pairs with the `forest-cover` CLI.
//!
//! ### Features
//! - Paginated, parallel fetches of indicator pages from the XML API
//! - Join of two indicator series (land area, forest percentage) by (year, country)
//! - Unit-tagged arithmetic (`SquareKm` × `Percent` → `SquareKm`)
//! - Grouped per-year bar charts rendered as SVG/PNG
//!
//! ### Example
//! ```no_run
//! use forest_cover::{Client, DateSpec, Percent, SquareKm};
//! use forest_cover::{series, stats, viz};
//!
//! let client = Client::default();
//! let years = [1990, 2000, 2005];
//! let regions = client.fetch_regions()?;
//!
//! let mut requests = Vec::new();
//! for code in ["AG.SRF.TOTL.K2", "AG.LND.FRST.ZS"] {
//!     for &y in &years {
//!         requests.push((code.to_string(), DateSpec::Year(y)));
//!     }
//! }
//! let fetched = client.fetch_all(&requests)?;
//!
//! let area_records: Vec<_> = fetched[..years.len()]
//!     .iter()
//!     .flat_map(|pages| series::extract_records(pages))
//!     .collect();
//! let forest_records: Vec<_> = fetched[years.len()..]
//!     .iter()
//!     .flat_map(|pages| series::extract_records(pages))
//!     .collect();
//! let areas = series::build_series::<SquareKm>(&area_records)?;
//! let forests = series::build_series::<Percent>(&forest_records)?;
//!
//! let qualifying = stats::available_regions(&areas, &forests, &years, &regions);
//! let per_year = stats::yearly_stats(&years, &qualifying, &areas, &forests);
//! viz::plot_histograms(&qualifying, &per_year, "forest.svg", 1200, 700)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod models;
pub mod series;
pub mod stats;
pub mod viz;

pub use api::Client;
pub use models::{DataRecord, DateSpec, IndicatorPage, Percent, Series, SeriesKey, SquareKm};
