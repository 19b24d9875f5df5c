//! Shared helpers: thresholds, index conversions, coordinate sorting

pub mod sort;
pub mod util;
