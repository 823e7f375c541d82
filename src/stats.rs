use crate::models::{Percent, Series, SeriesKey, SquareKm};
use std::collections::BTreeMap;

/// Per-year stat vectors: one derived value per qualifying region, region
/// order fixed across years (catalog order).
pub type YearlyStats = BTreeMap<i32, Vec<SquareKm>>;

/// Estimated forested area: `area * percent / 100`.
pub fn forest_area(area: SquareKm, cover: Percent) -> SquareKm {
    SquareKm(area.0 * cover.0 / 100.0)
}

/// Regions that have an entry in **both** series for **every** requested
/// year. This is an all-years AND, not per-year filtering, so the stat
/// vectors stay comparable across years. Catalog order is preserved.
pub fn available_regions(
    areas: &Series<SquareKm>,
    forests: &Series<Percent>,
    years: &[i32],
    catalog: &[String],
) -> Vec<String> {
    catalog
        .iter()
        .filter(|region| {
            years.iter().all(|&year| {
                let key = SeriesKey::new(year, region.as_str());
                areas.contains_key(&key) && forests.contains_key(&key)
            })
        })
        .cloned()
        .collect()
}

/// Compute the derived value per (year, region), iterating regions in the
/// order given. Callers pass the output of [`available_regions`], so every
/// lookup is expected to hit; a region that still misses a key is skipped.
pub fn yearly_stats(
    years: &[i32],
    regions: &[String],
    areas: &Series<SquareKm>,
    forests: &Series<Percent>,
) -> YearlyStats {
    let mut out = YearlyStats::new();
    for &year in years {
        let values: Vec<SquareKm> = regions
            .iter()
            .filter_map(|region| {
                let key = SeriesKey::new(year, region.as_str());
                match (areas.get(&key), forests.get(&key)) {
                    (Some(&a), Some(&f)) => Some(forest_area(a, f)),
                    _ => None,
                }
            })
            .collect();
        out.insert(year, values);
    }
    out
}
