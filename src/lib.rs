// src/lib.rs - Library interface for the motion-platform analysis pipeline

pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod dof;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod series;
pub mod types;

pub use config::AnalysisConfig;
pub use data_analysis::alignment::{preprocess, AlignmentReport};
pub use dof::{Dof, Quantity};
pub use error::{AnalysisError, Result};
pub use series::Series;
pub use types::Fragment;

/// Crate version reported by the binary.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
