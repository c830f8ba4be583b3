// src/plot_functions/plot_dof.rs

use std::error::Error;
use std::path::Path;

use crate::constants::TIME_COLUMN;
use crate::dof::{Dof, Quantity};
use crate::plot_framework::{draw_stacked_plot, PlotConfig, PlotSeries, PlotStyle};
use crate::series::Series;
use crate::types::{PlotPoints, RowRange};

/// `(t, column)` points over `rows`, or `None` if a column is missing.
pub(crate) fn time_points(series: &Series, column: &str, rows: &RowRange) -> Option<PlotPoints> {
    let t = series.column(TIME_COLUMN).ok()?;
    let values = series.column(column).ok()?;
    let end = rows.end.min(series.len());
    let start = rows.start.min(end);
    Some((start..end).map(|i| (t[i], values[i])).collect())
}

/// Commanded against measured trace of one quantity.
pub(crate) fn quantity_chart(
    series: &Series,
    quantity: Quantity,
    dof: Dof,
    rows: &RowRange,
    style: &PlotStyle,
) -> Option<PlotConfig> {
    let (cmd_col, mes_col) = quantity.columns();
    let commanded = time_points(series, cmd_col, rows)?;
    let measured = time_points(series, mes_col, rows)?;
    PlotConfig::fitted(
        format!("{} {}", dof.name().to_uppercase(), quantity.label()),
        vec![
            PlotSeries::line(measured, format!("Measured {}", quantity.label()), style.measured, style),
            PlotSeries::line(commanded, format!("Commanded {}", quantity.label()), style.commanded, style),
        ],
        "Time (s)",
        format!("{} ({})", quantity.label(), quantity.unit(dof)),
    )
}

/// Stacked position, velocity and acceleration of one DoF, commanded
/// against measured. `rows` limits the plotted interval; `None` plots all.
pub fn plot_dof(
    series: &Series,
    dof: Dof,
    rows: Option<RowRange>,
    root_name: &str,
    output_path: &Path,
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let rows = rows.unwrap_or(0..series.len());
    draw_stacked_plot(
        output_path,
        root_name,
        "Motion",
        Quantity::ALL.len(),
        style.size,
        style,
        |row| quantity_chart(series, Quantity::ALL[row], dof, &rows, style),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_points_clamp_to_series() {
        let s = Series::from_columns(vec![("t", vec![0.0, 0.1, 0.2]), ("pos_cmd", vec![1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(time_points(&s, "pos_cmd", &(1..10)).unwrap(), vec![(0.1, 2.0), (0.2, 3.0)]);
        assert!(time_points(&s, "pos_mes", &(0..3)).is_none());
    }
}
