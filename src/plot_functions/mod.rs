// src/plot_functions/mod.rs

pub mod plot_bode;
pub mod plot_dof;
pub mod plot_fragments;
pub mod plot_io;
pub mod plot_signal;

// src/plot_functions/mod.rs
