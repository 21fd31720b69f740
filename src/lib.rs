//! Glucose Chart - glucose readings rendered as a line chart with the
//! 70 to 180 mg/dL normal range shaded.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
