// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;
use tracing::{info, warn};

use crate::constants::{
    COLOR_COMMANDED, COLOR_MAGNITUDE, COLOR_MEASURED, COLOR_PHASE, COLOR_SECONDARY, COLOR_TREND,
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, LINE_WIDTH_PLOT, MARKER_SIZE, PLOT_HEIGHT, PLOT_WIDTH,
    PLOT_WIDTH_SQUARE,
};
use crate::types::PlotPoints;

/// Colours, strokes and sizes used by every plot. Passed explicitly to each
/// plot function; `PlotStyle::default()` holds the standard look.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub commanded: RGBColor,
    pub measured: RGBColor,
    pub secondary: RGBColor,
    pub trend: RGBColor,
    pub magnitude: RGBColor,
    pub phase: RGBColor,
    pub line_width: u32,
    pub legend_line_width: u32,
    pub marker_size: u32,
    /// Size of wide figures (time traces, Bode).
    pub size: (u32, u32),
    /// Size of square figures (input/output scatter).
    pub square_size: (u32, u32),
    pub font_main_title: i32,
    pub font_chart_title: i32,
    pub font_axis_label: i32,
    pub font_legend: i32,
    pub font_message: i32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            commanded: *COLOR_COMMANDED,
            measured: *COLOR_MEASURED,
            secondary: *COLOR_SECONDARY,
            trend: *COLOR_TREND,
            magnitude: *COLOR_MAGNITUDE,
            phase: *COLOR_PHASE,
            line_width: LINE_WIDTH_PLOT,
            legend_line_width: LINE_WIDTH_LEGEND,
            marker_size: MARKER_SIZE,
            size: (PLOT_WIDTH, PLOT_HEIGHT),
            square_size: (PLOT_WIDTH_SQUARE, PLOT_WIDTH_SQUARE),
            font_main_title: FONT_SIZE_MAIN_TITLE,
            font_chart_title: FONT_SIZE_CHART_TITLE,
            font_axis_label: FONT_SIZE_AXIS_LABEL,
            font_legend: FONT_SIZE_LEGEND,
            font_message: FONT_SIZE_MESSAGE,
        }
    }
}

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Finite x and y extents over all points of all series.
pub fn data_bounds(series: &[PlotSeries]) -> Option<(Range<f64>, Range<f64>)> {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for &(px, py) in series.iter().flat_map(|s| s.data.iter()) {
        if px.is_finite() && py.is_finite() {
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
    }
    if x.0 > x.1 {
        return None;
    }
    Some((x.0..x.1, y.0..y.1))
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    row_label: &str,
    plot_type: &str,
    reason: &str,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{row_label} {plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (style.font_message as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = style.font_message + LINE_HEIGHT_SPACING;
    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0) as i32;

    let center_x = width / 2 - max_line_length.saturating_mul(estimated_char_width) / 2;
    let center_y = height / 2 - (lines.len() as i32).saturating_mul(estimated_line_height) / 2;

    let text_style = ("sans-serif", style.font_message).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Markers,
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: PlotPoints,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub kind: SeriesKind,
}

impl PlotSeries {
    pub fn line(data: PlotPoints, label: impl Into<String>, color: RGBColor, style: &PlotStyle) -> Self {
        Self {
            data,
            label: label.into(),
            color,
            stroke_width: style.line_width,
            kind: SeriesKind::Line,
        }
    }

    pub fn markers(data: PlotPoints, label: impl Into<String>, color: RGBColor, style: &PlotStyle) -> Self {
        Self {
            data,
            label: label.into(),
            color,
            stroke_width: style.marker_size,
            kind: SeriesKind::Markers,
        }
    }
}

/// One chart of a figure.
#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

impl PlotConfig {
    /// Chart whose ranges cover all points, padded. `None` without finite data.
    pub fn fitted(
        title: impl Into<String>,
        series: Vec<PlotSeries>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Option<Self> {
        let (x_range, y_range) = data_bounds(&series)?;
        let (y_min, y_max) = calculate_range(y_range.start, y_range.end);
        let x_range = if x_range.end > x_range.start {
            x_range
        } else {
            let (x_min, x_max) = calculate_range(x_range.start, x_range.end);
            x_min..x_max
        };
        Some(Self {
            title: title.into(),
            x_range,
            y_range: y_min..y_max,
            series,
            x_label: x_label.into(),
            y_label: y_label.into(),
        })
    }
}

fn format_tick(y: &f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if y.abs() < 10.0 && y.fract() != 0.0 {
        format!("{:.2}", y)
    } else {
        format!("{:.0}", y)
    }
}

/// Draws a single chart: mesh, series and legend.
pub fn draw_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", style.font_chart_title))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&format_tick)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", style.font_axis_label))
        .draw()?;

    let mut legend_series_count = 0;
    for s in plot_config.series.iter().filter(|s| !s.data.is_empty()) {
        let color = s.color;
        let legend_width = style.legend_line_width;
        let drawn = match s.kind {
            SeriesKind::Line => chart.draw_series(LineSeries::new(
                s.data.iter().copied(),
                color.stroke_width(s.stroke_width),
            ))?,
            SeriesKind::Markers => chart.draw_series(
                s.data
                    .iter()
                    .map(|&p| Circle::new(p, s.stroke_width, color.filled())),
            )?,
        };
        if !s.label.is_empty() {
            drawn.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(legend_width))
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", style.font_legend))
            .draw()?;
    }
    Ok(())
}

/// Creates a figure with `rows` charts stacked vertically.
///
/// `get_row_plot_data(row)` returns the chart for that row, or `None` when
/// the data could not be prepared; such rows show a placeholder message.
pub fn draw_stacked_plot<F>(
    output_path: &Path,
    root_name: &str,
    plot_type_name: &str,
    rows: usize,
    size: (u32, u32),
    style: &PlotStyle,
    mut get_row_plot_data: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PlotConfig>,
{
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", style.font_main_title).into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((rows.max(1), 1));
    let mut any_row_plotted = false;

    for (row, area) in sub_plot_areas.iter().enumerate() {
        let row_label = format!("Row {}", row + 1);
        match get_row_plot_data(row) {
            Some(plot_config) => {
                let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                    && plot_config.y_range.end > plot_config.y_range.start;
                if has_data && valid_ranges {
                    draw_chart(area, &plot_config, style)?;
                    any_row_plotted = true;
                } else {
                    let reason = if !has_data { "No data points" } else { "Invalid ranges" };
                    draw_unavailable_message(area, &plot_config.title, plot_type_name, reason, style)?;
                }
            }
            None => {
                draw_unavailable_message(area, &row_label, plot_type_name, "Data Extraction Failed", style)?;
            }
        }
    }

    root_area.present()?;
    if any_row_plotted {
        info!("{} plot saved as '{}'", plot_type_name, output_path.display());
    } else {
        warn!(
            "'{}' holds only placeholder messages: no row had data to plot",
            output_path.display()
        );
    }
    Ok(())
}
