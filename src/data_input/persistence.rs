// src/data_input/persistence.rs

use csv::{ReaderBuilder, WriterBuilder};
use ndarray::Array1;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// What to do when an output file already exists.
pub enum OverwritePolicy<'a> {
    Always,
    Never,
    /// Ask the caller; `true` means overwrite.
    Ask(&'a mut dyn FnMut(&Path) -> bool),
}

impl fmt::Debug for OverwritePolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverwritePolicy::Always => f.write_str("Always"),
            OverwritePolicy::Never => f.write_str("Never"),
            OverwritePolicy::Ask(_) => f.write_str("Ask"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Target existed and the policy declined the overwrite.
    Skipped,
}

/// True when writing to `path` would replace an existing file.
pub fn would_overwrite(path: &Path) -> bool {
    path.exists()
}

/// Decides whether `path` may be written under `policy`.
pub fn may_write(path: &Path, policy: &mut OverwritePolicy<'_>) -> bool {
    if !would_overwrite(path) {
        return true;
    }
    match policy {
        OverwritePolicy::Always => true,
        OverwritePolicy::Never => false,
        OverwritePolicy::Ask(confirm) => confirm(path),
    }
}

/// Writes the series as CSV with a header row, columns in series order.
pub fn write_csv(series: &Series, path: &Path, mut policy: OverwritePolicy<'_>) -> Result<SaveOutcome> {
    if !may_write(path, &mut policy) {
        info!("Keeping existing {}", path.display());
        return Ok(SaveOutcome::Skipped);
    }

    let file = File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
    let names: Vec<&str> = series.column_names().collect();
    writer
        .write_record(&names)
        .map_err(|e| AnalysisError::csv(path, e))?;

    let columns = names
        .iter()
        .map(|name| series.column(name))
        .collect::<Result<Vec<_>>>()?;
    for row in 0..series.len() {
        writer
            .write_record(columns.iter().map(|c| c[row].to_string()))
            .map_err(|e| AnalysisError::csv(path, e))?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;

    info!("Saved {} rows to {}", series.len(), path.display());
    Ok(SaveOutcome::Written)
}

/// Reads a series previously written by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<Series> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(|e| AnalysisError::csv(path, e))?;
        for (column, cell) in values.iter_mut().zip(record.iter()) {
            column.push(cell.parse::<f64>().unwrap_or(f64::NAN));
        }
    }
    Series::from_columns(headers.into_iter().zip(values.into_iter().map(Array1::from)))
}
