//! Data module - Reading records, loading and the readings report

mod loader;
mod reading;
mod report;

pub use loader::{LoaderError, ReadingLoader};
pub use reading::{GlucoseStatus, Reading, ReadingSeries, EMERGENCY_THRESHOLD, LABEL_FORMAT};
pub use report::{report_rows, write_report_csv, ReportError, ReportRow, REPORT_COLUMNS};
