//! Stats module - Summary statistics over glucose readings

mod summary;

pub use summary::{LatestReading, ReadingSummary};
