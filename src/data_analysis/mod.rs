// src/data_analysis/mod.rs

pub mod alignment;
pub mod derivative;
pub mod fft_utils;
pub mod fragmentation;
pub mod frequency_response;
pub mod lag;
pub mod maneuver_windows;
pub mod offset;
pub mod peak_detection;
pub mod trend;
pub mod zero_crossing;

// src/data_analysis/mod.rs
