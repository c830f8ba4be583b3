// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN_700, ORANGE, PURPLE, RED, TEAL};
use plotters::style::RGBColor;

// Name of the distinguished time column.
pub const TIME_COLUMN: &str = "t";

// Column names produced by the log loader and the alignment pipeline.
pub const POS_CMD: &str = "pos_cmd";
pub const VEL_CMD: &str = "vel_cmd";
pub const ACC_CMD: &str = "acc_cmd";
pub const POS_MES: &str = "pos_mes";
pub const VEL_MES: &str = "vel_mes";
pub const ACC_MES: &str = "acc_mes";

// Default target sample rate for the time rescale (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 100.0;

// Derivatives and lag estimation need a left and a right neighbour.
pub const MIN_VALID_ROWS: usize = 3;

// Relative tolerance under which two cross-correlation values count as the same peak.
pub const CORRELATION_TIE_TOLERANCE: f64 = 1e-9;

// --- Motion profile constants ---
pub const FADED_SINE_PROFILE: &str = "FadedSineProfile";
pub const PROFILE_TICK_SCALE_S: f64 = 1e-4; // profile ticks -> seconds
pub const WINDOW_ROUND_DECIMALS: u32 = 6;

// Minimum rows between two splits of the zero-crossing splitter.
pub const DEFAULT_MIN_SAMPLES_BETWEEN_SPLITS: usize = 1;

// --- Frequency response ---
pub const BODE_PEAK_HEIGHT: f64 = 0.2;
pub const BODE_MAGNITUDE_FLOOR_DB: f64 = -100.0;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const PLOT_WIDTH_SQUARE: u32 = 1200;

// Font sizes.
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// --- Plot Color Assignments ---
pub const COLOR_COMMANDED: &RGBColor = &BLUE;
pub const COLOR_MEASURED: &RGBColor = &RED;
pub const COLOR_SECONDARY: &RGBColor = &ORANGE;
pub const COLOR_TREND: &RGBColor = &GREEN_700;
pub const COLOR_MAGNITUDE: &RGBColor = &TEAL;
pub const COLOR_PHASE: &RGBColor = &PURPLE;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const MARKER_SIZE: u32 = 4;

// src/constants.rs
