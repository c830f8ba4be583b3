// src/plot_functions/plot_fragments.rs

use plotters::style::RGBColor;
use std::error::Error;
use std::path::Path;

use crate::plot_framework::{draw_stacked_plot, PlotConfig, PlotSeries, PlotStyle};
use crate::plot_functions::plot_dof::time_points;
use crate::types::Fragment;

// Cycles through the style colours so neighbouring fragments differ.
fn fragment_color(index: usize, style: &PlotStyle) -> RGBColor {
    let palette = [style.commanded, style.measured, style.secondary, style.trend, style.magnitude, style.phase];
    palette[index % palette.len()]
}

/// Overlays `column` of every fragment, each against its own elapsed time.
pub fn plot_fragments(
    fragments: &[Fragment],
    column: &str,
    root_name: &str,
    output_path: &Path,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let series: Vec<PlotSeries> = fragments
        .iter()
        .enumerate()
        .filter_map(|(i, fragment)| {
            let points = time_points(&fragment.series, column, &(0..fragment.len()))?;
            let start = points.first()?.0;
            let relative = points.into_iter().map(|(t, v)| (t - start, v)).collect();
            Some(PlotSeries::line(
                relative,
                format!("rows {}..{}", fragment.source_rows.start, fragment.source_rows.end),
                fragment_color(i, style),
                style,
            ))
        })
        .collect();

    let title = format!("{} fragments: {}", fragments.len(), column);
    let mut config = PlotConfig::fitted(title, series, "Time since fragment start (s)", column);
    draw_stacked_plot(output_path, root_name, "Fragments", 1, style.size, style, |_| config.take())
}
