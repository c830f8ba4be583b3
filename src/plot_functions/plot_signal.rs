// src/plot_functions/plot_signal.rs

use std::error::Error;
use std::path::Path;

use crate::dof::{Dof, Quantity};
use crate::plot_framework::{draw_stacked_plot, PlotStyle};
use crate::plot_functions::plot_dof::quantity_chart;
use crate::series::Series;

/// Full-length commanded against measured trace of a single quantity.
pub fn plot_signal(
    series: &Series,
    dof: Dof,
    quantity: Quantity,
    root_name: &str,
    output_path: &Path,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let rows = 0..series.len();
    draw_stacked_plot(
        output_path,
        root_name,
        quantity.label(),
        1,
        style.size,
        style,
        |_| quantity_chart(series, quantity, dof, &rows, style),
    )
}
