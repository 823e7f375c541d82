use forest_cover::models::SquareKm;
use forest_cover::stats::YearlyStats;
use forest_cover::viz::{plot_histograms, plot_histograms_locale};
use std::fs;

fn sample_stats() -> (Vec<String>, YearlyStats) {
    let regions: Vec<String> = vec!["Brazil".into(), "Chile".into(), "Egypt".into()];
    let mut stats = YearlyStats::new();
    stats.insert(
        1990,
        vec![SquareKm(5_570_000.0), SquareKm(185_000.0), SquareKm(440.0)],
    );
    stats.insert(
        2000,
        vec![SquareKm(5_470_000.0), SquareKm(190_000.0), SquareKm(590.0)],
    );
    (regions, stats)
}

#[test]
fn histograms_produce_svg() {
    let (regions, stats) = sample_stats();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forest.svg");
    plot_histograms(&regions, &stats, &path, 900, 600).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "svg has content");
}

#[test]
fn histograms_produce_png() {
    let (regions, stats) = sample_stats();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forest.png");
    plot_histograms_locale(&regions, &stats, &path, 900, 600, "de", "Waldfläche").unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "png has content");
}

#[test]
fn empty_input_is_rejected() {
    let stats = YearlyStats::new();
    let err = plot_histograms(&[], &stats, "unused.svg", 900, 600).unwrap_err();
    assert!(err.to_string().contains("no data"));
}

#[test]
fn mismatched_vector_length_is_rejected() {
    let (regions, mut stats) = sample_stats();
    stats.insert(2005, vec![SquareKm(1.0)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.svg");
    assert!(plot_histograms(&regions, &stats, &path, 900, 600).is_err());
}
