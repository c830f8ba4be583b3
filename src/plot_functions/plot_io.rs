// src/plot_functions/plot_io.rs

use std::error::Error;
use std::path::Path;
use tracing::info;

use crate::data_analysis::trend::{fit_linear, TrendLine};
use crate::plot_framework::{calculate_range, draw_stacked_plot, PlotConfig, PlotSeries, PlotStyle};

/// Input amplitudes against output amplitudes for one test group.
#[derive(Debug, Clone, PartialEq)]
pub struct IoGroup {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFit {
    None,
    Free,
    ThroughOrigin,
}

/// Scatter of every group with an optional least-squares line per group.
/// Axes start at zero. Returns the fitted lines in group order.
pub fn plot_io(
    groups: &[IoGroup],
    fit: TrendFit,
    x_label: &str,
    y_label: &str,
    root_name: &str,
    output_path: &Path,
    style: &PlotStyle,
) -> Result<Vec<TrendLine>, Box<dyn Error>> {
    let palette = [style.commanded, style.measured, style.secondary, style.phase];
    let mut series = Vec::new();
    let mut trends = Vec::new();
    let mut x_max = 0.0f64;
    let mut y_max = 0.0f64;

    for (i, group) in groups.iter().enumerate() {
        let color = palette[i % palette.len()];
        let points: Vec<(f64, f64)> = group.x.iter().copied().zip(group.y.iter().copied()).collect();
        x_max = points.iter().map(|p| p.0).fold(x_max, f64::max);
        y_max = points.iter().map(|p| p.1).fold(y_max, f64::max);
        series.push(PlotSeries::markers(points, group.label.clone(), color, style));

        if fit == TrendFit::None {
            continue;
        }
        let trend = fit_linear(&group.x, &group.y, fit == TrendFit::ThroughOrigin)?;
        info!(
            "{}: slope {:.4}, intercept {:.4}, R² {:.4}",
            group.label, trend.slope, trend.intercept, trend.r_squared
        );
        let lo = group.x.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = group.x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        series.push(PlotSeries::line(
            vec![(lo, trend.predict(lo)), (hi, trend.predict(hi))],
            String::new(),
            color,
            style,
        ));
        trends.push(trend);
    }

    let (_, x_end) = calculate_range(0.0, x_max);
    let (_, y_end) = calculate_range(0.0, y_max);
    let mut config = Some(PlotConfig {
        title: "Input / Output".to_string(),
        x_range: 0.0..x_end,
        y_range: 0.0..y_end,
        series,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
    });
    draw_stacked_plot(output_path, root_name, "I/O", 1, style.square_size, style, |_| config.take())?;
    Ok(trends)
}
