// src/data_input/mod.rs

#[cfg(feature = "hdf5")]
pub mod hdf5_reader;
pub mod log_data;
pub mod log_parser;
pub mod persistence;
pub mod profile;

// src/data_input/mod.rs
