//! Render per-year forest-area histograms to **SVG** or **PNG**.
//!
//! One bar series per year, grouped over a region-category x axis. Colors
//! come from the Office chart palette, y-axis ticks use locale-aware
//! thousands separators, and large magnitudes are scaled to a readable unit
//! (thousands/millions/…).

use crate::models::SquareKm;
use crate::stats::YearlyStats;
use anyhow::{Result, anyhow};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        );
    });
}

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Map a user-provided locale tag to a num-format Locale.
/// Supported tags (case-insensitive): "en", "de", "fr", "es", "it", "pt", "nl".
fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Plot per-year grouped bars with default locale (`"en"`).
pub fn plot_histograms<P: AsRef<Path>>(
    regions: &[String],
    stats: &YearlyStats,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    plot_histograms_locale(regions, stats, out_path, width, height, "en", "Forest area by region")
}

/// Same as `plot_histograms` but with a locale tag for tick formatting and a
/// custom chart title.
pub fn plot_histograms_locale<P: AsRef<Path>>(
    regions: &[String],
    stats: &YearlyStats,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    title: &str,
) -> Result<()> {
    if regions.is_empty() || stats.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    for (year, values) in stats {
        if values.len() != regions.len() {
            return Err(anyhow!(
                "year {} has {} values for {} regions",
                year,
                values.len(),
                regions.len()
            ));
        }
    }
    ensure_fonts_registered();

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let max_val = stats
        .values()
        .flat_map(|v| v.iter())
        .map(|s| s.0)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_val.is_finite() {
        return Err(anyhow!("no numeric values to plot"));
    }
    let max_val = if max_val <= 0.0 { 1.0 } else { max_val };

    let num_locale = map_locale(locale_tag);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, regions, stats, max_val, num_locale, title)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, regions, stats, max_val, num_locale, title)?;
    }

    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    regions: &[String],
    stats: &YearlyStats,
    max_val: f64,
    num_locale: &'static Locale,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (yscale, scale_word) = choose_axis_scale(max_val);
    let y_max = max_val / yscale * 1.05;
    let n_regions = regions.len();

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 120)
        .build_cartesian_2d(0.0..n_regions as f64, 0.0..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    // X ticks land on the group boundaries; label each with its region name,
    // rotated so long names fit.
    let x_label_fmt = move |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        regions.get(i as usize).cloned().unwrap_or_default()
    };
    let y_label_fmt = move |v: &f64| {
        if yscale > 1.0 {
            format!("{:.1}", v)
        } else {
            ((*v).round() as i64).to_formatted_string(num_locale)
        }
    };
    let y_desc = if scale_word.is_empty() {
        "Forest area (km²)".to_string()
    } else {
        format!("Forest area (km², {})", scale_word)
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Region")
        .y_desc(y_desc)
        .x_labels(n_regions + 1)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(("sans-serif", 14))
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // One bar per year inside each region group.
    let n_years = stats.len().max(1);
    let group_width = 0.8f64;
    let bar_w = group_width / n_years as f64;

    for (idx, (year, values)) in stats.iter().enumerate() {
        let color = office_color(idx);
        let bars = values.iter().enumerate().map(|(i, v)| {
            let x0 = i as f64 + (1.0 - group_width) / 2.0 + idx as f64 * bar_w;
            let x1 = x0 + bar_w;
            let SquareKm(raw) = *v;
            Rectangle::new([(x0, 0.0), (x1, raw / yscale)], color.filled())
        });
        let legend_color = color;
        chart
            .draw_series(bars)
            .map_err(|e| anyhow!("{:?}", e))?
            .label(year.to_string())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 14, y + 5)], legend_color.filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
