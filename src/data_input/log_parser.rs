// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use ndarray::Array1;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use crate::constants::{POS_MES, TIME_COLUMN};
use crate::data_input::log_data::{commanded_columns, measured_columns, ColumnSpec};
use crate::dof::Dof;
use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Source of raw motion-log columns.
pub trait LogReader {
    /// Reads the requested columns into one series, in `columns` order.
    fn read_columns(&self, path: &Path, columns: &[ColumnSpec]) -> Result<Series>;
}

/// Reads logs exported as delimited text. A column path is a header name; an
/// indexed column is looked up as `path[index]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLogReader;

impl CsvLogReader {
    fn header_for(spec: &ColumnSpec) -> String {
        match spec.index {
            Some(i) => format!("{}[{}]", spec.path, i),
            None => spec.path.clone(),
        }
    }
}

impl LogReader for CsvLogReader {
    fn read_columns(&self, path: &Path, columns: &[ColumnSpec]) -> Result<Series> {
        let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));
        let header_record = reader
            .headers()
            .map_err(|e| AnalysisError::csv(path, e))?
            .clone();

        // Map each requested column to its CSV position.
        let mut header_indices = Vec::with_capacity(columns.len());
        for spec in columns {
            let header = Self::header_for(spec);
            match header_record.iter().position(|h| h == header) {
                Some(i) => header_indices.push(i),
                None => return Err(AnalysisError::MissingColumn(format!("{} ({})", header, path.display()))),
            }
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        for result in reader.records() {
            // A structurally broken record aborts the load; bad cells do not.
            let record = result.map_err(|e| AnalysisError::csv(path, e))?;
            for (column, &csv_idx) in values.iter_mut().zip(&header_indices) {
                // Empty or unparseable cells become missing values for clean().
                let value = record
                    .get(csv_idx)
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or(f64::NAN);
                column.push(value);
            }
        }

        Series::from_columns(
            columns
                .iter()
                .zip(values)
                .map(|(spec, v)| (spec.name.clone(), Array1::from(v))),
        )
    }
}

/// Picks a reader from the file extension.
pub fn reader_for_path(path: &Path) -> Box<dyn LogReader> {
    #[cfg(feature = "hdf5")]
    {
        let is_hdf5 = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "h5" | "hdf5"))
            .unwrap_or(false);
        if is_hdf5 {
            return Box::new(crate::data_input::hdf5_reader::Hdf5LogReader);
        }
    }
    let _ = path;
    Box::new(CsvLogReader)
}

/// Loads commanded and measured data for one DoF and merges them on the tick.
///
/// Both halves are cleaned before the join so missing ticks never match.
/// The measured heave is sign-inverted to match the command convention.
pub fn load_dof<R>(reader: &R, path: &Path, dof: Dof) -> Result<Series>
where
    R: LogReader + ?Sized,
{
    let mut commanded = reader.read_columns(path, &commanded_columns(dof))?;
    let mut measured = reader.read_columns(path, &measured_columns(dof))?;
    commanded.clean();
    measured.clean();

    let mut merged = commanded.inner_join_on(&measured, TIME_COLUMN)?;
    let sign = dof.measured_sign();
    if sign != 1.0 {
        merged.map_column(POS_MES, |v| v * sign)?;
    }

    info!(
        "Loaded {} '{}': {} commanded rows, {} measured rows, {} merged",
        path.display(),
        dof,
        commanded.len(),
        measured.len(),
        merged.len()
    );
    Ok(merged)
}
