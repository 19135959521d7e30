//! Compile-time configuration and constants.

/// Passenger table compiled into the binary (seaborn `titanic` layout).
pub const BUNDLED_DATASET: &str = include_str!("../data/titanic.csv");

/// Name reported for the bundled table in logs and the window.
pub const BUNDLED_DATASET_NAME: &str = "bundled titanic.csv";

/// Number of equal-width bins in the age histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Upper bound on requested histogram bins; larger requests are clamped.
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Shown in place of a summary that is undefined for an empty selection.
pub const UNAVAILABLE: &str = "N/A";

pub const APP_TITLE: &str = "Titanic Dashboard";

// Window geometry
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];
pub const SIDE_PANEL_WIDTH: f32 = 260.0;
