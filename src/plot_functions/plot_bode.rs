// src/plot_functions/plot_bode.rs

use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Text};
use plotters::prelude::IntoLogRange;
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, IntoFont, RGBColor, ShapeStyle};
use std::error::Error;
use std::path::Path;
use tracing::info;

use crate::data_analysis::frequency_response::FrequencyResponse;
use crate::plot_framework::PlotStyle;

/// Two-row Bode diagram: magnitude (dB) and phase (deg) of every sampled
/// excitation frequency, on a logarithmic frequency axis.
pub fn plot_bode(
    response: &FrequencyResponse,
    root_name: &str,
    output_path: &Path,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    if response.is_empty() {
        return Err("No frequency response points to plot".into());
    }

    let freq: Vec<f64> = response.points.iter().map(|p| p.freq_hz).collect();
    let mag: Vec<f64> = response.points.iter().map(|p| p.magnitude_db).collect();
    let phase: Vec<f64> = response.points.iter().map(|p| p.phase_deg).collect();

    let mut freq_min = freq.iter().copied().fold(f64::INFINITY, f64::min);
    let mut freq_max = freq.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if freq_min <= 0.0 {
        return Err("Frequency response holds non-positive frequencies".into());
    }
    // Half a decade of margin keeps edge points off the frame.
    freq_min /= 10f64.sqrt();
    freq_max *= 10f64.sqrt();

    let root = BitMapBackend::new(output_path, style.size).into_drawing_area();
    root.fill(&WHITE)?;
    root.draw(&Text::new(
        format!("Bode Plot - {root_name}"),
        (10, 10),
        ("sans-serif", style.font_main_title).into_font().color(&BLACK),
    ))?;
    let areas = root.margin(50, 5, 5, 5).split_evenly((2, 1));

    draw_scatter_panel(
        &areas[0],
        "Magnitude",
        "Magnitude (dB)",
        (freq.as_slice(), mag.as_slice()),
        (freq_min, freq_max),
        10.0,
        0.0,
        style.magnitude,
        style,
    )?;
    draw_scatter_panel(
        &areas[1],
        "Phase",
        "Phase (degrees)",
        (freq.as_slice(), phase.as_slice()),
        (freq_min, freq_max),
        30.0,
        -180.0,
        style.phase,
        style,
    )?;

    root.present()?;
    info!("Bode plot with {} points saved as '{}'", freq.len(), output_path.display());
    Ok(())
}

/// One log-frequency scatter with a horizontal reference line.
#[allow(clippy::too_many_arguments)]
fn draw_scatter_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    caption: &str,
    y_desc: &str,
    (freq, values): (&[f64], &[f64]),
    (freq_min, freq_max): (f64, f64),
    padding: f64,
    reference: f64,
    color: RGBColor,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let v_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let v_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range_min = (v_min.min(reference) - padding).floor();
    let range_max = (v_max.max(reference) + padding).ceil();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", style.font_chart_title).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((freq_min..freq_max).log_scale(), range_min..range_max)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc(y_desc)
        .x_label_style(("sans-serif", style.font_axis_label).into_font())
        .y_label_style(("sans-serif", style.font_axis_label).into_font())
        .draw()?;

    chart.draw_series(LineSeries::new(
        vec![(freq_min, reference), (freq_max, reference)],
        ShapeStyle::from(&BLACK).stroke_width(1),
    ))?;
    chart.draw_series(
        freq.iter()
            .zip(values.iter())
            .map(|(&f, &v)| Circle::new((f, v), style.marker_size, color.filled())),
    )?;
    Ok(())
}
