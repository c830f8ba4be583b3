// src/data_input/log_data.rs

use crate::constants::{ACC_CMD, POS_CMD, POS_MES, TIME_COLUMN, VEL_CMD};
use crate::dof::Dof;

/// One column to pull out of a motion log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,          // Column name in the resulting series.
    pub path: String,          // Dataset path (HDF5) or header name (CSV).
    pub index: Option<usize>,  // Axis index for multi-column fields.
}

impl ColumnSpec {
    pub fn scalar(name: &str, path: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            index: None,
        }
    }

    pub fn indexed(name: &str, path: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            index: Some(index),
        }
    }
}

pub const COMMANDED_TICK_PATH: &str = "data/commanded/tick";
pub const MEASURED_TICK_PATH: &str = "data/measured/tick";
pub const MEASURED_POSITION_PATH: &str = "data/measured/data/actual_pos";

/// Commanded tick, position, velocity and acceleration for one DoF.
pub fn commanded_columns(dof: Dof) -> Vec<ColumnSpec> {
    let base = format!("data/commanded/data/{}", dof.name());
    vec![
        ColumnSpec::scalar(TIME_COLUMN, COMMANDED_TICK_PATH),
        ColumnSpec::scalar(POS_CMD, base.clone()),
        ColumnSpec::scalar(VEL_CMD, format!("{base}dot")),
        ColumnSpec::scalar(ACC_CMD, format!("{base}dotdot")),
    ]
}

/// Measured tick and the DoF's slice of the six-axis position field.
pub fn measured_columns(dof: Dof) -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::scalar(TIME_COLUMN, MEASURED_TICK_PATH),
        ColumnSpec::indexed(POS_MES, MEASURED_POSITION_PATH, dof.index()),
    ]
}

// src/data_input/log_data.rs
