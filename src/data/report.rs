//! Readings Report Module
//! Tabular listing of readings, newest first, and its CSV export.

use crate::data::reading::{GlucoseStatus, Reading};
use chrono::FixedOffset;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Report column headers.
pub const REPORT_COLUMNS: [&str; 4] = ["Data/Hora", "Valor", "Status", "Observação"];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to build report: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write report: {0}")]
    IoError(#[from] std::io::Error),
}

/// One row of the readings table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Local time, `DD/MM/YYYY HH:mm`.
    pub when: String,
    pub value: f64,
    pub status: GlucoseStatus,
    pub note: Option<String>,
}

/// Rows for `readings`, newest first, with times in `offset`.
pub fn report_rows(readings: &[Reading], offset: FixedOffset) -> Vec<ReportRow> {
    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by(|a, b| b.when.cmp(&a.when));
    ordered
        .into_iter()
        .map(|r| ReportRow {
            when: r.label(offset),
            value: r.value,
            status: r.status,
            note: r.note.clone(),
        })
        .collect()
}

/// Report rows as a DataFrame with [`REPORT_COLUMNS`].
pub fn report_frame(rows: &[ReportRow]) -> PolarsResult<DataFrame> {
    let when: Vec<&str> = rows.iter().map(|r| r.when.as_str()).collect();
    let value: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let status: Vec<String> = rows.iter().map(|r| r.status.to_string()).collect();
    let note: Vec<Option<&str>> = rows.iter().map(|r| r.note.as_deref()).collect();

    DataFrame::new(vec![
        Column::new(REPORT_COLUMNS[0].into(), when),
        Column::new(REPORT_COLUMNS[1].into(), value),
        Column::new(REPORT_COLUMNS[2].into(), status),
        Column::new(REPORT_COLUMNS[3].into(), note),
    ])
}

/// Write the readings report to `path` as CSV.
pub fn write_report_csv(
    readings: &[Reading],
    offset: FixedOffset,
    path: &Path,
) -> Result<(), ReportError> {
    let rows = report_rows(readings, offset);
    let mut df = report_frame(&rows)?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!(path = %path.display(), rows = rows.len(), "readings report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sao_paulo() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn readings() -> Vec<Reading> {
        vec![
            Reading::new(Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(), 95.0, None),
            Reading::new(
                Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap(),
                210.0,
                Some("after lunch".to_string()),
            ),
            Reading::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), 62.0, None),
        ]
    }

    #[test]
    fn test_report_rows_newest_first() {
        let rows = report_rows(&readings(), sao_paulo());
        let times: Vec<&str> = rows.iter().map(|r| r.when.as_str()).collect();
        assert_eq!(
            times,
            vec!["01/05/2024 12:00", "01/05/2024 08:00", "01/05/2024 06:00"]
        );
        assert_eq!(rows[0].value, 210.0);
        assert_eq!(rows[0].status, GlucoseStatus::AboveTarget);
        assert_eq!(rows[0].note.as_deref(), Some("after lunch"));
        assert_eq!(rows[2].status, GlucoseStatus::Hypoglycemia);
        assert_eq!(rows[2].note, None);
    }

    #[test]
    fn test_report_frame_columns() {
        let df = report_frame(&report_rows(&readings(), sao_paulo())).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, REPORT_COLUMNS.to_vec());
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_write_report_csv() {
        let path = std::env::temp_dir()
            .join(format!("glucose_report_{}.csv", std::process::id()));
        write_report_csv(&readings(), sao_paulo(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Data/Hora,Valor,Status,Observação");
        assert!(lines[1].starts_with("01/05/2024 12:00,210"));
        assert!(lines[1].ends_with(",Above target,after lunch"));
        assert!(lines[3].ends_with(",Hypoglycemia,"));
    }
}
