// src/data_input/hdf5_reader.rs

use ndarray::{Array1, Array2};
use std::path::Path;

use crate::data_input::log_data::ColumnSpec;
use crate::data_input::log_parser::LogReader;
use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Reads motion logs recorded as HDF5. Scalar fields are 1-D datasets;
/// indexed fields are 2-D datasets with one column per axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hdf5LogReader;

fn hdf5_error(path: &Path, e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Hdf5 {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl LogReader for Hdf5LogReader {
    fn read_columns(&self, path: &Path, columns: &[ColumnSpec]) -> Result<Series> {
        let file = hdf5::File::open(path).map_err(|e| hdf5_error(path, e))?;
        let mut series = Series::new();

        for spec in columns {
            let dataset = file
                .dataset(&spec.path)
                .map_err(|_| AnalysisError::MissingColumn(format!("{} ({})", spec.path, path.display())))?;
            let values: Array1<f64> = match spec.index {
                None => dataset.read_1d::<f64>().map_err(|e| hdf5_error(path, e))?,
                Some(axis) => {
                    let table: Array2<f64> = dataset.read_2d::<f64>().map_err(|e| hdf5_error(path, e))?;
                    if axis >= table.ncols() {
                        return Err(AnalysisError::InvalidParameter(format!(
                            "{} has {} columns, axis {} requested",
                            spec.path,
                            table.ncols(),
                            axis
                        )));
                    }
                    table.column(axis).to_owned()
                }
            };
            series.set_column(spec.name.clone(), values)?;
        }
        Ok(series)
    }
}
