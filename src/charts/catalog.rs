//! The fixed chart catalog.
//!
//! Each entry pairs an output name with a render function. Render functions
//! return `Ok(false)` when their input is empty and nothing was drawn; the data
//! preparation behind them lives in plain functions so it can be tested
//! without a font stack.

use super::bins::{cut_counts, cut_index, Histogram};
use super::dataset::{ChartDataset, Feature, PlotRow};
use super::renderer::{
    format_price, format_thousands, gradient, AxisFormat, Bar, BarSeries, HistogramPlot,
    Labels, Marker, ScatterSeries, Slice, StaticChartRenderer, Target, DARK_GREEN, FLAT_BLUE,
    FLAT_GRAY, FLAT_GREEN, FLAT_ORANGE, FLAT_PURPLE, FLAT_RED, FLAT_TEAL, FLAT_YELLOW, SLATE,
};
use super::ChartError;
use crate::stats::{GroupStats, NumericKey, StatsCalculator};
use plotters::style::RGBColor;

pub type RenderFn = fn(&ChartDataset, Target) -> Result<bool, ChartError>;

pub struct ChartDef {
    pub name: &'static str,
    pub render: RenderFn,
}

pub const CATALOG: [ChartDef; 20] = [
    ChartDef { name: "01_price_distribution", render: price_distribution },
    ChartDef { name: "02_price_by_rooms", render: price_by_rooms },
    ChartDef { name: "03_area_distribution", render: area_distribution },
    ChartDef { name: "04_price_per_sqm", render: price_per_sqm },
    ChartDef { name: "05_room_distribution", render: room_distribution },
    ChartDef { name: "06_floor_distribution", render: floor_distribution },
    ChartDef { name: "07_top_cities", render: top_cities },
    ChartDef { name: "08_property_features", render: property_features },
    ChartDef { name: "09_price_ranges", render: price_ranges },
    ChartDef { name: "10_area_vs_price", render: area_vs_price },
    ChartDef { name: "11_building_heights", render: building_heights },
    ChartDef { name: "12_top_locations", render: top_locations },
    ChartDef { name: "13_avg_price_by_city", render: avg_price_by_city },
    ChartDef { name: "14_feature_impact_on_price", render: feature_impact_on_price },
    ChartDef { name: "15_area_by_rooms", render: area_by_rooms },
    ChartDef { name: "16_market_segmentation", render: market_segmentation },
    ChartDef { name: "17_floor_preference", render: floor_preference },
    ChartDef { name: "18_building_type_distribution", render: building_types },
    ChartDef { name: "19_top_locations_price", render: top_locations_price },
    ChartDef { name: "20_area_per_room_efficiency", render: area_per_room },
];

pub const PRICE_RANGE_EDGES: [f64; 8] = [
    0.0, 50_000.0, 100_000.0, 150_000.0, 200_000.0, 300_000.0, 500_000.0, f64::INFINITY,
];
const PRICE_RANGE_LABELS: [&str; 7] = [
    "<50K", "50K-100K", "100K-150K", "150K-200K", "200K-300K", "300K-500K", ">500K",
];

pub const SEGMENT_EDGES: [f64; 4] = [0.0, 80_000.0, 200_000.0, f64::INFINITY];
const SEGMENT_LABELS: [&str; 3] = ["Budget (<80K)", "Mid-Range (80K-200K)", "Luxury (>200K)"];

pub const FLOOR_EDGES: [f64; 6] = [0.0, 1.0, 3.0, 6.0, 10.0, 50.0];
const FLOOR_LABELS: [&str; 5] = [
    "Ground (1st)", "Low (2-3)", "Mid (4-6)", "High (7-10)", "Very High (11+)",
];

pub const BUILDING_EDGES: [f64; 5] = [0.0, 5.0, 10.0, 16.0, 100.0];
const BUILDING_LABELS: [&str; 4] = [
    "Low-Rise (≤5 floors)", "Mid-Rise (6-10 floors)", "High-Rise (11-16 floors)", "Skyscraper (>16 floors)",
];

const ROOM_COLORS: [RGBColor; 5] = [FLAT_BLUE, FLAT_RED, FLAT_GREEN, FLAT_ORANGE, FLAT_PURPLE];

// ----------------------------------------------------------------------------
// Data preparation
// ----------------------------------------------------------------------------

type Field = fn(&PlotRow) -> Option<f64>;

fn price(r: &PlotRow) -> Option<f64> {
    r.price
}

fn area(r: &PlotRow) -> Option<f64> {
    r.area
}

fn floor(r: &PlotRow) -> Option<f64> {
    r.floor
}

fn floors(r: &PlotRow) -> Option<f64> {
    r.floors
}

fn area_per_room_value(r: &PlotRow) -> Option<f64> {
    match (r.area, r.rooms) {
        (Some(a), Some(n)) if n != 0.0 => Some(a / n),
        _ => None,
    }
}

fn city(r: &PlotRow) -> Option<&str> {
    r.city.as_deref()
}

fn location(r: &PlotRow) -> Option<&str> {
    r.location.as_deref()
}

/// Non-null values of `field` no larger than `max`.
pub fn values_up_to(rows: &[PlotRow], field: Field, max: f64) -> Vec<f64> {
    rows.iter().filter_map(field).filter(|v| *v <= max).collect()
}

/// Statistics of `value` per room count, for rooms up to `max_rooms` and
/// groups holding at least `min_count` rows.
pub fn room_groups(
    rows: &[PlotRow],
    value: Field,
    max_rooms: f64,
    min_count: usize,
) -> Vec<(NumericKey, GroupStats)> {
    let pairs = rows.iter().filter_map(|r| match (r.rooms, value(r)) {
        (Some(rooms), Some(v)) if rooms <= max_rooms => Some((NumericKey(rooms), v)),
        _ => None,
    });
    StatsCalculator::group_stats(pairs)
        .into_iter()
        .filter(|(_, stats)| stats.count >= min_count)
        .collect()
}

/// Price per square metre by room count, trimmed to the open q05..q95 band.
///
/// The q95 cut is applied first and q05 is then taken over what remains.
pub fn price_per_sqm_groups(rows: &[PlotRow]) -> Vec<(NumericKey, Vec<f64>)> {
    let mut pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|r| match (r.rooms, r.price, r.area) {
            (Some(rooms), Some(p), Some(a)) if rooms <= 6.0 && a != 0.0 => Some((rooms, p / a)),
            _ => None,
        })
        .collect();

    let values: Vec<f64> = pairs.iter().map(|(_, v)| *v).collect();
    let upper = StatsCalculator::quantile(&values, 0.95);
    pairs.retain(|(_, v)| *v < upper);

    let values: Vec<f64> = pairs.iter().map(|(_, v)| *v).collect();
    let lower = StatsCalculator::quantile(&values, 0.05);
    pairs.retain(|(_, v)| *v > lower);

    let mut groups: Vec<(NumericKey, Vec<f64>)> = Vec::new();
    for (rooms, v) in pairs {
        let key = NumericKey(rooms);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(v),
            None => groups.push((key, vec![v])),
        }
    }
    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups
}

/// Listings per room count up to seven rooms, ordered by room count.
pub fn room_counts(rows: &[PlotRow]) -> Vec<(NumericKey, usize)> {
    let mut counts =
        StatsCalculator::value_counts(rows.iter().filter_map(|r| r.rooms).filter(|r| *r <= 7.0).map(NumericKey));
    counts.sort_by(|a, b| a.0.cmp(&b.0));
    counts
}

/// The `n` most frequent values of a text field.
pub fn top_counts(rows: &[PlotRow], field: fn(&PlotRow) -> Option<&str>, n: usize) -> Vec<(String, usize)> {
    let mut counts = StatsCalculator::value_counts(rows.iter().filter_map(field));
    counts.truncate(n);
    counts.into_iter().map(|(k, c)| (k.to_string(), c)).collect()
}

/// Rows flagged true per feature, most common first.
pub fn feature_counts(rows: &[PlotRow]) -> Vec<(Feature, usize)> {
    let mut counts: Vec<(Feature, usize)> = Feature::ALL
        .iter()
        .map(|&f| (f, rows.iter().filter(|r| r.flag(f) == Some(true)).count()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Price statistics per text key, for keys with at least `min_count` rows.
/// The `top` most frequent keys are kept and returned by ascending mean price.
pub fn mean_price_by(
    rows: &[PlotRow],
    key: fn(&PlotRow) -> Option<&str>,
    min_count: usize,
    top: usize,
) -> Vec<(String, GroupStats)> {
    let pairs = rows
        .iter()
        .filter_map(|r| Some((key(r)?.to_string(), r.price?)));
    let mut groups: Vec<(String, GroupStats)> = StatsCalculator::group_stats(pairs)
        .into_iter()
        .filter(|(_, stats)| stats.count >= min_count)
        .collect();

    groups.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    groups.truncate(top);
    groups.sort_by(|a, b| a.1.mean.total_cmp(&b.1.mean));
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImpact {
    pub feature: Feature,
    pub with: f64,
    pub without: f64,
}

impl FeatureImpact {
    pub fn diff(&self) -> f64 {
        self.with - self.without
    }
}

/// Mean price with and without each of the first five features, ordered by
/// the difference. Features lacking either side are left out.
pub fn feature_impact(rows: &[PlotRow]) -> Vec<FeatureImpact> {
    let mean_where = |feature: Feature, wanted: bool| {
        let prices: Vec<f64> = rows
            .iter()
            .filter(|r| r.flag(feature) == Some(wanted))
            .filter_map(|r| r.price)
            .collect();
        StatsCalculator::compute_descriptive_stats(&prices).mean
    };

    let mut impacts: Vec<FeatureImpact> = Feature::ALL[..5]
        .iter()
        .map(|&feature| FeatureImpact {
            feature,
            with: mean_where(feature, true),
            without: mean_where(feature, false),
        })
        .filter(|i| i.with.is_finite() && i.without.is_finite())
        .collect();
    impacts.sort_by(|a, b| a.diff().total_cmp(&b.diff()));
    impacts
}

/// Price statistics per right-closed bin of `field`; empty bins are absent.
pub fn price_by_bin(rows: &[PlotRow], field: Field, edges: &[f64]) -> Vec<(usize, GroupStats)> {
    let pairs = rows
        .iter()
        .filter_map(|r| Some((cut_index(field(r)?, edges)?, r.price?)));
    StatsCalculator::group_stats(pairs)
}

fn rooms_label(rooms: &NumericKey) -> String {
    if rooms.0 > 1.0 {
        format!("{rooms} Rooms")
    } else {
        format!("{rooms} Room")
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

// ----------------------------------------------------------------------------
// Charts
// ----------------------------------------------------------------------------

fn stats_line(name: &str, value: String) -> String {
    format!("{:<8}{:>12}", format!("{name}:"), value)
}

fn mean_median_markers(stats: &GroupStats, fmt: impl Fn(f64) -> String) -> Vec<Marker> {
    vec![
        Marker {
            label: format!("Mean: {}", fmt(stats.mean)),
            value: stats.mean,
            color: FLAT_RED,
        },
        Marker {
            label: format!("Median: {}", fmt(stats.median)),
            value: stats.median,
            color: DARK_GREEN,
        },
    ]
}

fn price_distribution(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let prices: Vec<f64> = data.clean.iter().filter_map(price).collect();
    if prices.is_empty() {
        return Ok(false);
    }
    let stats = StatsCalculator::compute_descriptive_stats(&prices);
    let hist = Histogram::new(&prices, 35);
    let azn = |v: f64| format!("{} AZN", format_thousands(v));

    StaticChartRenderer::histogram(
        target,
        Labels {
            title: "Real Estate Price Distribution in Azerbaijan",
            x: "Price (AZN)",
            y: "Number of Properties",
        },
        &HistogramPlot {
            hist: &hist,
            color: FLAT_BLUE,
            x_format: AxisFormat::Price,
            markers: mean_median_markers(&stats, |v| format!("{:.0}K AZN", v / 1000.0)),
            stats: vec![
                format!("Properties: {}", format_thousands(stats.count as f64)),
                String::new(),
                stats_line("Mean", azn(stats.mean)),
                stats_line("Median", azn(stats.median)),
                stats_line("Std", azn(stats.std)),
                stats_line("Min", azn(stats.min)),
                stats_line("Max", azn(stats.max)),
            ],
        },
    )?;
    Ok(true)
}

fn price_by_rooms(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = room_groups(&data.clean, price, 6.0, 50);
    if groups.is_empty() {
        return Ok(false);
    }
    mean_median_bars(
        target,
        Labels {
            title: "Average Property Price by Number of Rooms",
            x: "Number of Rooms",
            y: "Price (AZN)",
        },
        &groups,
        ("Mean Price", "Median Price"),
        (FLAT_RED, FLAT_GREEN),
        AxisFormat::Price,
        format_thousands,
    )?;
    Ok(true)
}

fn area_distribution(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let areas = values_up_to(&data.clean, area, 500.0);
    if areas.is_empty() {
        return Ok(false);
    }
    let stats = StatsCalculator::compute_descriptive_stats(&areas);
    let hist = Histogram::new(&areas, 40);
    let sqm = |v: f64| format!("{v:.1} m²");

    StaticChartRenderer::histogram(
        target,
        Labels {
            title: "Property Area Distribution",
            x: "Area (m²)",
            y: "Number of Properties",
        },
        &HistogramPlot {
            hist: &hist,
            color: FLAT_PURPLE,
            x_format: AxisFormat::Plain,
            markers: mean_median_markers(&stats, |v| format!("{v:.0} m²")),
            stats: vec![
                format!("Properties: {}", format_thousands(stats.count as f64)),
                String::new(),
                stats_line("Mean", sqm(stats.mean)),
                stats_line("Median", sqm(stats.median)),
                stats_line("Std", sqm(stats.std)),
                stats_line("Min", sqm(stats.min)),
                stats_line("Max", sqm(stats.max)),
            ],
        },
    )?;
    Ok(true)
}

fn price_per_sqm(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = price_per_sqm_groups(&data.clean);
    if groups.is_empty() {
        return Ok(false);
    }
    let categories: Vec<String> = groups.iter().map(|(k, _)| k.to_string()).collect();
    let values: Vec<Vec<f64>> = groups.into_iter().map(|(_, v)| v).collect();

    StaticChartRenderer::boxplot(
        target,
        Labels {
            title: "Price per Square Meter by Number of Rooms",
            x: "Number of Rooms",
            y: "Price per m² (AZN)",
        },
        &categories,
        &values,
    )?;
    Ok(true)
}

fn room_distribution(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let counts = room_counts(&data.clean);
    if counts.is_empty() {
        return Ok(false);
    }
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let colors = gradient(FLAT_TEAL, counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(colors)
        .map(|((rooms, count), color)| Bar {
            label: rooms.to_string(),
            value: *count as f64,
            annotation: format!(
                "{} ({:.1}%)",
                format_thousands(*count as f64),
                percent(*count, total)
            ),
            color,
        })
        .collect();

    StaticChartRenderer::bars(
        target,
        Labels {
            title: "Distribution of Properties by Number of Rooms",
            x: "Number of Rooms",
            y: "Number of Properties",
        },
        &bars,
        AxisFormat::Count,
    )?;
    Ok(true)
}

/// Histogram of a whole-number field with the mode in its statistics box.
fn whole_number_histogram(
    target: Target,
    labels: Labels,
    values: &[f64],
    bins: usize,
    color: RGBColor,
    unit: &str,
) -> Result<(), ChartError> {
    let stats = StatsCalculator::compute_descriptive_stats(values);
    let hist = Histogram::new(values, bins);
    let with_unit = |v: String| if unit.is_empty() { v } else { format!("{v} {unit}") };

    StaticChartRenderer::histogram(
        target,
        labels,
        &HistogramPlot {
            hist: &hist,
            color,
            x_format: AxisFormat::Plain,
            markers: mean_median_markers(&stats, |v| with_unit(format!("{v:.1}"))),
            stats: vec![
                format!("Properties: {}", format_thousands(stats.count as f64)),
                String::new(),
                stats_line("Mean", with_unit(format!("{:.1}", stats.mean))),
                stats_line("Median", with_unit(format!("{:.1}", stats.median))),
                stats_line("Mode", with_unit(format!("{:.0}", stats.mode))),
                stats_line("Std", with_unit(format!("{:.1}", stats.std))),
                format!("Range:  {:.0} - {:.0}", stats.min, stats.max),
            ],
        },
    )
}

fn floor_distribution(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let values = values_up_to(&data.clean, floor, 25.0);
    if values.is_empty() {
        return Ok(false);
    }
    whole_number_histogram(
        target,
        Labels {
            title: "Property Distribution by Floor Level",
            x: "Floor Number",
            y: "Number of Properties",
        },
        &values,
        25,
        FLAT_ORANGE,
        "",
    )?;
    Ok(true)
}

fn count_bars(counts: &[(String, usize)], base: RGBColor) -> Vec<Bar> {
    counts
        .iter()
        .zip(gradient(base, counts.len()))
        .map(|((label, count), color)| Bar {
            label: label.clone(),
            value: *count as f64,
            annotation: format_thousands(*count as f64),
            color,
        })
        .collect()
}

fn top_cities(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let counts = top_counts(&data.all, city, 15);
    if counts.is_empty() {
        return Ok(false);
    }
    StaticChartRenderer::horizontal_bars(
        target,
        Labels {
            title: "Top 15 Cities by Number of Properties",
            x: "Number of Properties",
            y: "City",
        },
        &count_bars(&counts, FLAT_BLUE),
        AxisFormat::Count,
    )?;
    Ok(true)
}

fn property_features(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    if data.all.is_empty() {
        return Ok(false);
    }
    let total = data.all.len();
    let colors = [FLAT_RED, FLAT_BLUE, FLAT_GREEN, FLAT_YELLOW, FLAT_PURPLE, FLAT_TEAL];
    let bars: Vec<Bar> = feature_counts(&data.all)
        .into_iter()
        .zip(colors)
        .map(|((feature, count), color)| Bar {
            label: feature.label().to_string(),
            value: count as f64,
            annotation: format!(
                "{} ({:.1}%)",
                format_thousands(count as f64),
                percent(count, total)
            ),
            color,
        })
        .collect();

    StaticChartRenderer::bars(
        target,
        Labels {
            title: "Property Features Distribution",
            x: "Feature",
            y: "Number of Properties",
        },
        &bars,
        AxisFormat::Count,
    )?;
    Ok(true)
}

fn price_ranges(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let prices: Vec<f64> = data.clean.iter().filter_map(price).collect();
    if prices.is_empty() {
        return Ok(false);
    }
    let counts = cut_counts(&prices, &PRICE_RANGE_EDGES);
    let colors = gradient(FLAT_RED, counts.len());
    let bars: Vec<Bar> = PRICE_RANGE_LABELS
        .iter()
        .zip(counts)
        .zip(colors)
        .map(|((label, count), color)| Bar {
            label: label.to_string(),
            value: count as f64,
            annotation: format!(
                "{} ({:.1}%)",
                format_thousands(count as f64),
                percent(count, prices.len())
            ),
            color,
        })
        .collect();

    StaticChartRenderer::bars(
        target,
        Labels {
            title: "Distribution of Properties by Price Range",
            x: "Price Range (AZN)",
            y: "Number of Properties",
        },
        &bars,
        AxisFormat::Count,
    )?;
    Ok(true)
}

fn area_vs_price(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for r in &data.clean {
        let (Some(a), Some(p), Some(rooms)) = (r.area, r.price, r.rooms) else {
            continue;
        };
        if a > 300.0 || rooms > 5.0 {
            continue;
        }
        let key = NumericKey(rooms);
        let name = rooms_label(&key);
        match series.iter_mut().find(|s| s.name == name) {
            Some(s) => s.points.push((a, p)),
            None => series.push(ScatterSeries {
                name,
                color: FLAT_BLUE,
                points: vec![(a, p)],
            }),
        }
    }
    if series.is_empty() {
        return Ok(false);
    }
    series.sort_by(|a, b| a.name.cmp(&b.name));
    for (s, color) in series.iter_mut().zip(ROOM_COLORS.iter().cycle()) {
        s.color = *color;
    }

    StaticChartRenderer::scatter(
        target,
        Labels {
            title: "Property Price vs Area (by Number of Rooms)",
            x: "Area (m²)",
            y: "Price (AZN)",
        },
        &series,
        AxisFormat::Price,
    )?;
    Ok(true)
}

fn building_heights(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let values = values_up_to(&data.clean, floors, 30.0);
    if values.is_empty() {
        return Ok(false);
    }
    whole_number_histogram(
        target,
        Labels {
            title: "Distribution by Building Height",
            x: "Total Floors in Building",
            y: "Number of Properties",
        },
        &values,
        30,
        SLATE,
        "floors",
    )?;
    Ok(true)
}

fn top_locations(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let counts = top_counts(&data.all, location, 20);
    if counts.is_empty() {
        return Ok(false);
    }
    StaticChartRenderer::horizontal_bars(
        target,
        Labels {
            title: "Top 20 Locations by Property Count",
            x: "Number of Properties",
            y: "Location",
        },
        &count_bars(&counts, FLAT_PURPLE),
        AxisFormat::Count,
    )?;
    Ok(true)
}

fn mean_price_bars(groups: &[(String, GroupStats)], base: RGBColor, annotate: fn(&GroupStats) -> String) -> Vec<Bar> {
    groups
        .iter()
        .zip(gradient(base, groups.len()))
        .map(|((name, stats), color)| Bar {
            label: name.clone(),
            value: stats.mean,
            annotation: annotate(stats),
            color,
        })
        .collect()
}

fn avg_price_by_city(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = mean_price_by(&data.clean, city, 100, 12);
    if groups.is_empty() {
        return Ok(false);
    }
    let bars = mean_price_bars(&groups, FLAT_TEAL, |s| {
        format!(
            "{} AZN ({} props)",
            format_thousands(s.mean),
            format_thousands(s.count as f64)
        )
    });
    StaticChartRenderer::horizontal_bars(
        target,
        Labels {
            title: "Average Property Price by City (Top 12 Cities)",
            x: "Average Price (AZN)",
            y: "City",
        },
        &bars,
        AxisFormat::Price,
    )?;
    Ok(true)
}

fn feature_impact_on_price(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let impacts = feature_impact(&data.clean);
    if impacts.is_empty() {
        return Ok(false);
    }
    let thousands = |v: f64| format!("{:.0}K", v / 1000.0);
    let categories: Vec<String> = impacts.iter().map(|i| i.feature.label().to_string()).collect();
    let without: Vec<f64> = impacts.iter().map(|i| i.without).collect();
    let with: Vec<f64> = impacts.iter().map(|i| i.with).collect();

    StaticChartRenderer::grouped_bars(
        target,
        Labels {
            title: "Impact of Property Features on Average Price",
            x: "Average Price (AZN)",
            y: "Feature",
        },
        &categories,
        &[
            BarSeries {
                name: "Without Feature".to_string(),
                color: FLAT_RED,
                annotations: without.iter().map(|v| thousands(*v)).collect(),
                values: without,
            },
            BarSeries {
                name: "With Feature".to_string(),
                color: FLAT_GREEN,
                annotations: with.iter().map(|v| thousands(*v)).collect(),
                values: with,
            },
        ],
        AxisFormat::Price,
        true,
    )?;
    Ok(true)
}

/// Mean and median bars per room count.
fn mean_median_bars(
    target: Target,
    labels: Labels,
    groups: &[(NumericKey, GroupStats)],
    names: (&str, &str),
    colors: (RGBColor, RGBColor),
    value_format: AxisFormat,
    annotate: impl Fn(f64) -> String,
) -> Result<(), ChartError> {
    let categories: Vec<String> = groups.iter().map(|(k, _)| rooms_label(k)).collect();
    let means: Vec<f64> = groups.iter().map(|(_, s)| s.mean).collect();
    let medians: Vec<f64> = groups.iter().map(|(_, s)| s.median).collect();

    StaticChartRenderer::grouped_bars(
        target,
        labels,
        &categories,
        &[
            BarSeries {
                name: names.0.to_string(),
                color: colors.0,
                annotations: means.iter().map(|v| annotate(*v)).collect(),
                values: means,
            },
            BarSeries {
                name: names.1.to_string(),
                color: colors.1,
                annotations: medians.iter().map(|v| annotate(*v)).collect(),
                values: medians,
            },
        ],
        value_format,
        false,
    )
}

fn area_by_rooms(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = room_groups(&data.clean, area, 6.0, 50);
    if groups.is_empty() {
        return Ok(false);
    }
    mean_median_bars(
        target,
        Labels {
            title: "Average Property Area by Number of Rooms",
            x: "Number of Rooms",
            y: "Area (m²)",
        },
        &groups,
        ("Mean Area", "Median Area"),
        (FLAT_BLUE, FLAT_YELLOW),
        AxisFormat::Plain,
        |v| format!("{v:.0}m²"),
    )?;
    Ok(true)
}

fn market_segmentation(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let prices: Vec<f64> = data.clean.iter().filter_map(price).collect();
    let counts = cut_counts(&prices, &SEGMENT_EDGES);
    let slices: Vec<Slice> = SEGMENT_LABELS
        .iter()
        .zip(counts)
        .zip([FLAT_BLUE, FLAT_GREEN, FLAT_RED])
        .filter(|((_, count), _)| *count > 0)
        .map(|((label, count), color)| Slice {
            label: label.to_string(),
            value: count as f64,
            color,
        })
        .collect();
    if slices.is_empty() {
        return Ok(false);
    }
    StaticChartRenderer::donut(target, "Real Estate Market Segmentation by Price", &slices)?;
    Ok(true)
}

fn binned_price_bars(
    groups: &[(usize, GroupStats)],
    labels: &[&str],
    colors: &[RGBColor],
    value: fn(&GroupStats) -> f64,
    annotate: fn(&GroupStats) -> String,
) -> Vec<Bar> {
    groups
        .iter()
        .map(|(bin, stats)| Bar {
            label: labels.get(*bin).copied().unwrap_or_default().to_string(),
            value: value(stats),
            annotation: annotate(stats),
            color: colors[*bin % colors.len()],
        })
        .collect()
}

fn floor_preference(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = price_by_bin(&data.clean, floor, &FLOOR_EDGES);
    if groups.is_empty() {
        return Ok(false);
    }
    let bars = binned_price_bars(
        &groups,
        &FLOOR_LABELS,
        &[FLAT_ORANGE, FLAT_BLUE, FLAT_GREEN, FLAT_PURPLE, FLAT_RED],
        |s| s.mean,
        |s| format!("{:.0}K AZN ({} props)", s.mean / 1000.0, format_thousands(s.count as f64)),
    );
    StaticChartRenderer::bars(
        target,
        Labels {
            title: "Average Price by Floor Level Category",
            x: "Floor Category",
            y: "Average Price (AZN)",
        },
        &bars,
        AxisFormat::Price,
    )?;
    Ok(true)
}

fn building_types(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = price_by_bin(&data.clean, floors, &BUILDING_EDGES);
    if groups.is_empty() {
        return Ok(false);
    }
    let bars = binned_price_bars(
        &groups,
        &BUILDING_LABELS,
        &[FLAT_GRAY, FLAT_BLUE, FLAT_GREEN, FLAT_RED],
        |s| s.count as f64,
        |s| format!("{} | Avg: {:.0}K", format_thousands(s.count as f64), s.mean / 1000.0),
    );
    StaticChartRenderer::bars(
        target,
        Labels {
            title: "Property Distribution by Building Type",
            x: "Building Type",
            y: "Number of Properties",
        },
        &bars,
        AxisFormat::Count,
    )?;
    Ok(true)
}

fn top_locations_price(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = mean_price_by(&data.clean, location, 200, 15);
    if groups.is_empty() {
        return Ok(false);
    }
    let bars = mean_price_bars(&groups, FLAT_GREEN, |s| {
        format!("{} AZN ({})", format_price(s.mean), format_thousands(s.count as f64))
    });
    StaticChartRenderer::horizontal_bars(
        target,
        Labels {
            title: "Average Price by Top 15 Locations (min. 200 properties)",
            x: "Average Price (AZN)",
            y: "Location",
        },
        &bars,
        AxisFormat::Price,
    )?;
    Ok(true)
}

fn area_per_room(data: &ChartDataset, target: Target) -> Result<bool, ChartError> {
    let groups = room_groups(&data.clean, area_per_room_value, 6.0, 0);
    if groups.is_empty() {
        return Ok(false);
    }
    mean_median_bars(
        target,
        Labels {
            title: "Average Area per Room by Property Size",
            x: "Number of Rooms",
            y: "Area per Room (m²/room)",
        },
        &groups,
        ("Mean Area/Room", "Median Area/Room"),
        (FLAT_RED, FLAT_BLUE),
        AxisFormat::Plain,
        |v| format!("{v:.1}m²"),
    )?;
    Ok(true)
}
