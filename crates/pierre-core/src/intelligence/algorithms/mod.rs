// ABOUTME: Intelligence algorithm types re-exported from pierre-core
// ABOUTME: Contains MaxHrAlgorithm for heart rate estimation

/// Maximum heart rate estimation algorithms
pub mod maxhr;

pub use maxhr::MaxHrAlgorithm;
