//! Static Chart Renderer
//! Draws the chart catalog to PNG files with plotters' bitmap backend.
//!
//! Every chart shares one layout: bold title, labelled axes, light grid and,
//! where the chart has several series, a legend in the upper left corner.

use super::bins::Histogram;
use super::ChartError;
use plotters::coord::{CoordTranslate, Shift};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// Colors
pub const FLAT_BLUE: RGBColor = RGBColor(52, 152, 219);
pub const FLAT_RED: RGBColor = RGBColor(231, 76, 60);
pub const FLAT_GREEN: RGBColor = RGBColor(46, 204, 113);
pub const DARK_GREEN: RGBColor = RGBColor(39, 174, 96); // Median lines
pub const FLAT_ORANGE: RGBColor = RGBColor(230, 126, 34);
pub const FLAT_YELLOW: RGBColor = RGBColor(243, 156, 18);
pub const FLAT_PURPLE: RGBColor = RGBColor(155, 89, 182);
pub const FLAT_TEAL: RGBColor = RGBColor(26, 188, 156);
pub const FLAT_GRAY: RGBColor = RGBColor(149, 165, 166);
pub const SLATE: RGBColor = RGBColor(52, 73, 94);
const INK: RGBColor = RGBColor(44, 62, 80); // Frames and legend borders
const GRID: RGBColor = RGBColor(225, 225, 225);

const FONT: &str = "sans-serif";
const MONO: &str = "monospace";

/// Output file and pixel size of one chart.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub path: &'a Path,
    pub size: (u32, u32),
}

/// Title and axis descriptions.
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// Tick label style of a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFormat {
    Plain,
    Count,
    Price,
}

impl AxisFormat {
    pub fn apply(&self, value: f64) -> String {
        match self {
            AxisFormat::Plain => format!("{value:.0}"),
            AxisFormat::Count => format_thousands(value),
            AxisFormat::Price => format_price(value),
        }
    }
}

/// Vertical reference line drawn over a histogram.
#[derive(Debug, Clone)]
pub struct Marker {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct HistogramPlot<'a> {
    pub hist: &'a Histogram,
    pub color: RGBColor,
    pub x_format: AxisFormat,
    pub markers: Vec<Marker>,
    /// Monospace lines of the statistics box in the upper right corner.
    pub stats: Vec<String>,
}

/// One category bar and the text printed at its tip.
#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub annotation: String,
    pub color: RGBColor,
}

/// One series of a grouped bar chart, with a value per category.
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub name: String,
    pub color: RGBColor,
    pub values: Vec<f64>,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Histogram with gradient bins, dashed markers and a statistics box.
    pub fn histogram(target: Target, labels: Labels, plot: &HistogramPlot) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let hist = plot.hist;
        let x_lo = hist.edges.first().copied().unwrap_or(0.0);
        let x_hi = hist.edges.last().copied().unwrap_or(1.0);
        let y_hi = (hist.max_count() as f64 * 1.1).max(1.0);

        let mut chart = Self::builder(&root, labels.title)
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        let x_format = plot.x_format;
        chart
            .configure_mesh()
            .x_desc(labels.x)
            .y_desc(labels.y)
            .x_labels(10)
            .y_labels(8)
            .x_label_formatter(&|v| x_format.apply(*v))
            .y_label_formatter(&|v| format_thousands(*v))
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        let shades = gradient(plot.color, hist.counts.len());
        chart
            .draw_series(hist.bars().zip(shades).map(|((lo, hi, count), color)| {
                Rectangle::new([(lo, 0.0), (hi, count as f64)], color.filled())
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        chart
            .draw_series(hist.bars().map(|(lo, hi, count)| {
                Rectangle::new([(lo, 0.0), (hi, count as f64)], WHITE.stroke_width(2))
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        for marker in &plot.markers {
            let color = marker.color;
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(marker.value, 0.0), (marker.value, y_hi)],
                    12,
                    8,
                    color.stroke_width(3),
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?
                .label(marker.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3))
                });
        }
        if !plot.markers.is_empty() {
            Self::legend(&mut chart)?;
        }

        Self::stats_box(&root, target.size, &plot.stats)?;
        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Vertical bars, one per category, annotated at their tips.
    pub fn bars(
        target: Target,
        labels: Labels,
        bars: &[Bar],
        y_format: AxisFormat,
    ) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let n = bars.len();
        let y_hi = Self::value_ceiling(bars.iter().map(|b| b.value));
        let names: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = Self::builder(&root, labels.title)
            .build_cartesian_2d(-0.5..n as f64 - 0.5, 0.0..y_hi)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(labels.x)
            .y_desc(labels.y)
            .x_labels(n + 1)
            .y_labels(8)
            .x_label_formatter(&|v| category_label(&names, *v))
            .y_label_formatter(&|v| y_format.apply(*v))
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], bar.color.filled())
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                Text::new(
                    bar.annotation.clone(),
                    (i as f64, bar.value),
                    annotation_style(HPos::Center, VPos::Bottom),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Horizontal bars; the first bar sits at the bottom of the axis.
    pub fn horizontal_bars(
        target: Target,
        labels: Labels,
        bars: &[Bar],
        x_format: AxisFormat,
    ) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let n = bars.len();
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let x_hi = Self::value_ceiling(bars.iter().map(|b| b.value)) * 1.1;
        let names: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(labels.title, title_font())
            .margin(30)
            .x_label_area_size(80)
            .y_label_area_size(240)
            .build_cartesian_2d(0.0..x_hi, -0.5..n as f64 - 0.5)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(labels.x)
            .y_desc(labels.y)
            .x_labels(8)
            .y_labels(n + 1)
            .x_label_formatter(&|v| x_format.apply(*v))
            .y_label_formatter(&|v| category_label(&names, *v))
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let y = i as f64;
                Rectangle::new([(0.0, y - 0.4), (bar.value, y + 0.4)], bar.color.filled())
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                Text::new(
                    bar.annotation.clone(),
                    (bar.value + max * 0.01, i as f64),
                    annotation_style(HPos::Left, VPos::Center),
                )
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Side-by-side bars per category, one color per series.
    ///
    /// With `horizontal` the categories run up the y axis instead.
    pub fn grouped_bars(
        target: Target,
        labels: Labels,
        categories: &[String],
        series: &[BarSeries],
        value_format: AxisFormat,
        horizontal: bool,
    ) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let n = categories.len();
        let all_values = series.iter().flat_map(|s| s.values.iter().copied());
        let value_hi = Self::value_ceiling(all_values) * if horizontal { 1.1 } else { 1.0 };
        let names: Vec<&str> = categories.iter().map(String::as_str).collect();
        let width = 0.7 / series.len().max(1) as f64;

        let category_range = -0.5..n as f64 - 0.5;
        let value_range = 0.0..value_hi;
        let (x_range, y_range) = if horizontal {
            (value_range, category_range)
        } else {
            (category_range, value_range)
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(labels.title, title_font())
            .margin(30)
            .x_label_area_size(80)
            .y_label_area_size(if horizontal { 200 } else { 110 })
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        let category_fmt = |v: &f64| category_label(&names, *v);
        let value_fmt = |v: &f64| value_format.apply(*v);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(labels.x)
            .y_desc(labels.y)
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16));
        if horizontal {
            mesh.disable_y_mesh()
                .x_labels(8)
                .y_labels(n + 1)
                .x_label_formatter(&value_fmt)
                .y_label_formatter(&category_fmt);
        } else {
            mesh.disable_x_mesh()
                .x_labels(n + 1)
                .y_labels(8)
                .x_label_formatter(&category_fmt)
                .y_label_formatter(&value_fmt);
        }
        mesh.draw().map_err(|e| ChartError::Drawing(e.to_string()))?;

        for (k, s) in series.iter().enumerate() {
            let offset = -0.35 + width * k as f64;
            let color = s.color;
            let place = |i: usize, v: f64| {
                let lo = i as f64 + offset;
                if horizontal {
                    [(0.0, lo), (v, lo + width)]
                } else {
                    [(lo, 0.0), (lo + width, v)]
                }
            };

            chart
                .draw_series(
                    s.values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| Rectangle::new(place(i, v), color.filled())),
                )
                .map_err(|e| ChartError::Drawing(e.to_string()))?
                .label(s.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled()));

            chart
                .draw_series(s.values.iter().zip(&s.annotations).enumerate().map(
                    |(i, (&v, text))| {
                        let mid = i as f64 + offset + width / 2.0;
                        if horizontal {
                            Text::new(
                                text.clone(),
                                (v + value_hi * 0.01, mid),
                                annotation_style(HPos::Left, VPos::Center),
                            )
                        } else {
                            Text::new(
                                text.clone(),
                                (mid, v),
                                annotation_style(HPos::Center, VPos::Bottom),
                            )
                        }
                    },
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        Self::legend(&mut chart)?;

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// One box per category: quartiles, median and 1.5 IQR whiskers.
    pub fn boxplot(
        target: Target,
        labels: Labels,
        categories: &[String],
        groups: &[Vec<f64>],
    ) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let n = groups.len() as i32;
        let (lo, hi) = groups
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let pad = ((hi - lo) * 0.1).max(1.0);
        let (y_lo, y_hi) = ((lo - pad).max(0.0) as f32, (hi + pad) as f32);

        let mut chart = Self::builder(&root, labels.title)
            .build_cartesian_2d((0..n).into_segmented(), y_lo..y_hi)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(labels.x)
            .y_desc(labels.y)
            .y_labels(8)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => categories
                    .get(*i as usize)
                    .cloned()
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|v| format_thousands(*v as f64))
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        let box_width = (target.size.0 / (groups.len() as u32 + 1) / 3).max(10);
        chart
            .draw_series(groups.iter().enumerate().map(|(i, values)| {
                Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), &Quartiles::new(values.as_slice()))
                    .width(box_width)
                    .whisker_width(0.5)
                    .style(FLAT_BLUE.stroke_width(2))
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Scatter plot, one color and legend entry per series.
    pub fn scatter(
        target: Target,
        labels: Labels,
        series: &[ScatterSeries],
        y_format: AxisFormat,
    ) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let points = series.iter().flat_map(|s| s.points.iter());
        let (x_hi, y_hi) = points.fold((0.0f64, 0.0f64), |(x, y), &(px, py)| (x.max(px), y.max(py)));

        let mut chart = Self::builder(&root, labels.title)
            .build_cartesian_2d(0.0..(x_hi * 1.05).max(1.0), 0.0..(y_hi * 1.05).max(1.0))
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(labels.x)
            .y_desc(labels.y)
            .x_labels(10)
            .y_labels(8)
            .y_label_formatter(&|v| y_format.apply(*v))
            .light_line_style(WHITE)
            .bold_line_style(GRID)
            .axis_style(INK.stroke_width(2))
            .axis_desc_style((FONT, 22))
            .label_style((FONT, 16))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        for s in series {
            let color = s.color;
            chart
                .draw_series(
                    s.points
                        .iter()
                        .map(|&p| Circle::new(p, 4, color.mix(0.5).filled())),
                )
                .map_err(|e| ChartError::Drawing(e.to_string()))?
                .label(s.name.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 6, color.filled()));
        }
        Self::legend(&mut chart)?;

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    /// Donut chart with percentages on the ring and a count legend beside it.
    pub fn donut(target: Target, title: &str, slices: &[Slice]) -> Result<(), ChartError> {
        let root = Self::root(target)?;
        let area = root
            .titled(title, title_font())
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

        let (w, h) = area.dim_in_pixel();
        let center = ((w as f64 * 0.4) as i32, (h / 2) as i32);
        let radius = w.min(h) as f64 * 0.38;
        let sizes: Vec<f64> = slices.iter().map(|s| s.value).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|s| s.color).collect();
        let names: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();

        let mut pie = Pie::new(
            &center,
            &radius,
            sizes.as_slice(),
            colors.as_slice(),
            names.as_slice(),
        );
        pie.start_angle(-90.0);
        pie.label_style((FONT, 22).into_font().color(&INK));
        pie.percentages((FONT, 20).into_font().color(&WHITE));
        pie.donut_hole(radius * 0.6);
        area.draw(&pie)
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        let legend_x = (w as f64 * 0.75) as i32;
        let mut y = (h as f64 * 0.35) as i32;
        for slice in slices {
            area.draw(&Rectangle::new([(legend_x, y), (legend_x + 24, y + 24)], slice.color.filled()))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
            let text = format!("{}: {} properties", slice.label, format_thousands(slice.value));
            area.draw(&Text::new(text, (legend_x + 34, y + 4), (FONT, 20).into_font().color(&INK)))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
            y += 40;
        }

        root.present().map_err(|e| ChartError::Drawing(e.to_string()))?;
        Ok(())
    }

    fn root(target: Target) -> Result<DrawingArea<BitMapBackend<'_>, Shift>, ChartError> {
        let root = BitMapBackend::new(target.path, target.size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::DrawingArea(e.to_string()))?;
        Ok(root)
    }

    fn builder<'a, 'b>(
        root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
        title: &str,
    ) -> ChartBuilder<'a, 'static, BitMapBackend<'b>> {
        let mut builder = ChartBuilder::on(root);
        builder
            .caption(title, title_font())
            .margin(30)
            .x_label_area_size(80)
            .y_label_area_size(110);
        builder
    }

    fn legend<'a, DB: DrawingBackend + 'a, CT: CoordTranslate>(
        chart: &mut ChartContext<'a, DB, CT>,
    ) -> Result<(), ChartError> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.95))
            .border_style(INK)
            .label_font((FONT, 18))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))
    }

    /// Framed monospace text block in the upper right of the canvas.
    fn stats_box(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        size: (u32, u32),
        lines: &[String],
    ) -> Result<(), ChartError> {
        if lines.is_empty() {
            return Ok(());
        }
        let line_h = 24;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let box_w = longest * 11 + 40;
        let box_h = lines.len() as i32 * line_h + 30;
        let x1 = size.0 as i32 - 60;
        let x0 = x1 - box_w;
        let y0 = 110;

        root.draw(&Rectangle::new([(x0, y0), (x1, y0 + box_h)], WHITE.mix(0.95).filled()))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        root.draw(&Rectangle::new([(x0, y0), (x1, y0 + box_h)], INK.stroke_width(2)))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        for (i, line) in lines.iter().enumerate() {
            let y = y0 + 15 + i as i32 * line_h;
            root.draw(&Text::new(line.as_str(), (x0 + 20, y), (MONO, 18).into_font().color(&INK)))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
        Ok(())
    }

    /// Upper bound of a value axis with headroom for the annotations.
    fn value_ceiling(values: impl Iterator<Item = f64>) -> f64 {
        let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.15
        } else {
            1.0
        }
    }
}

fn title_font() -> TextStyle<'static> {
    (FONT, 36).into_font().style(FontStyle::Bold).color(&INK)
}

fn annotation_style(h: HPos, v: VPos) -> TextStyle<'static> {
    (FONT, 16)
        .into_font()
        .style(FontStyle::Bold)
        .color(&INK)
        .pos(Pos::new(h, v))
}

/// Category name at an integral axis position, blank between categories.
fn category_label(names: &[&str], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
}

/// `n` shades of `base`, from a light tint to the full color.
pub fn gradient(base: RGBColor, n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 };
            shade(base, 0.45 + 0.55 * t)
        })
        .collect()
}

/// Blend `base` toward white; `strength` 1.0 keeps the base color.
pub fn shade(base: RGBColor, strength: f64) -> RGBColor {
    let mix = |c: u8| (255.0 - (255.0 - c as f64) * strength).round().clamp(0.0, 255.0) as u8;
    RGBColor(mix(base.0), mix(base.1), mix(base.2))
}

/// Integer with thousands separators: `1234567.4` → `1,234,567`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

/// Compact price tick: `1.5M`, `250K`, `900`.
pub fn format_price(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{}K", (value / 1_000.0).trunc() as i64)
    } else {
        format!("{}", value.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1234.0), "1,234");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-45210.0), "-45,210");
        assert_eq!(format_thousands(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2_450_000.0), "2.5M");
        assert_eq!(format_price(185_900.0), "185K");
        assert_eq!(format_price(1_000.0), "1K");
        assert_eq!(format_price(750.0), "750");
    }

    #[test]
    fn test_category_label() {
        let names = ["1 Room", "2 Rooms"];
        assert_eq!(category_label(&names, 1.0), "2 Rooms");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }

    #[test]
    fn test_gradient_darkens() {
        let shades = gradient(FLAT_BLUE, 3);
        assert_eq!(shades.len(), 3);
        assert_eq!(shades[2], FLAT_BLUE);
        assert!(shades[0].0 > shades[1].0 && shades[1].0 > shades[2].0);
        assert_eq!(shade(FLAT_RED, 0.0), RGBColor(255, 255, 255));
    }
}
