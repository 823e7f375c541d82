use forest_cover::models::{Percent, Series, SeriesKey, SquareKm};
use forest_cover::stats::{available_regions, forest_area, yearly_stats};

fn areas_of(entries: &[(&str, i32, f64)]) -> Series<SquareKm> {
    entries
        .iter()
        .map(|(c, y, v)| (SeriesKey::new(*y, *c), SquareKm(*v)))
        .collect()
}

fn forests_of(entries: &[(&str, i32, f64)]) -> Series<Percent> {
    entries
        .iter()
        .map(|(c, y, v)| (SeriesKey::new(*y, *c), Percent(*v)))
        .collect()
}

#[test]
fn derived_area_is_area_times_percent() {
    assert_eq!(
        forest_area(SquareKm(1000.0), Percent(10.0)),
        SquareKm(100.0)
    );
    assert_eq!(forest_area(SquareKm(0.0), Percent(50.0)), SquareKm(0.0));
}

#[test]
fn region_must_have_both_series_for_every_year() {
    let years = [1990, 2000, 2005];
    let catalog: Vec<String> = vec!["Brazil".into(), "Chad".into(), "Chile".into()];

    // Brazil: complete. Chile: complete. Chad: present for 2 of 3 years in
    // the forest series, so it must be excluded.
    let areas = areas_of(&[
        ("Brazil", 1990, 8_515_770.0),
        ("Brazil", 2000, 8_515_770.0),
        ("Brazil", 2005, 8_515_770.0),
        ("Chad", 1990, 1_284_000.0),
        ("Chad", 2000, 1_284_000.0),
        ("Chad", 2005, 1_284_000.0),
        ("Chile", 1990, 756_102.0),
        ("Chile", 2000, 756_102.0),
        ("Chile", 2005, 756_102.0),
    ]);
    let forests = forests_of(&[
        ("Brazil", 1990, 65.4),
        ("Brazil", 2000, 64.56),
        ("Brazil", 2005, 61.0),
        ("Chad", 1990, 10.4),
        ("Chad", 2005, 9.2),
        ("Chile", 1990, 24.5),
        ("Chile", 2000, 25.1),
        ("Chile", 2005, 25.9),
    ]);

    let got = available_regions(&areas, &forests, &years, &catalog);
    assert_eq!(got, vec!["Brazil".to_string(), "Chile".to_string()]);
}

#[test]
fn yearly_stats_follow_catalog_order() {
    let years = [2000, 2005];
    let regions: Vec<String> = vec!["Brazil".into(), "Chile".into()];

    let areas = areas_of(&[
        ("Brazil", 2000, 1000.0),
        ("Brazil", 2005, 1000.0),
        ("Chile", 2000, 500.0),
        ("Chile", 2005, 500.0),
    ]);
    let forests = forests_of(&[
        ("Brazil", 2000, 50.0),
        ("Brazil", 2005, 40.0),
        ("Chile", 2000, 20.0),
        ("Chile", 2005, 10.0),
    ]);

    let got = yearly_stats(&years, &regions, &areas, &forests);
    assert_eq!(got.len(), 2);
    assert_eq!(got[&2000], vec![SquareKm(500.0), SquareKm(100.0)]);
    assert_eq!(got[&2005], vec![SquareKm(400.0), SquareKm(50.0)]);
}
