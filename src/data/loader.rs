//! Readings Loader Module
//! Loads glucose readings from CSV (Polars) or the JSON readings API format.

use crate::data::reading::Reading;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use polars::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Naive timestamp layouts accepted besides RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Row {row}: invalid timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
    #[error("Row {row}: missing value")]
    MissingValue { row: usize },
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

/// Reading as served by the readings API.
#[derive(Debug, Deserialize)]
struct ApiReading {
    when: String,
    value: f64,
    #[serde(default)]
    note: Option<String>,
}

/// Loads readings, interpreting naive timestamps in a local offset.
pub struct ReadingLoader {
    offset: FixedOffset,
}

impl ReadingLoader {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Load by file extension (`.csv` or `.json`).
    pub fn load_file(&self, path: &Path) -> Result<Vec<Reading>, LoaderError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => self.load_csv(path),
            "json" => self.load_json(path),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load a CSV file with `when` and `value` columns and an optional `note`.
    pub fn load_csv(&self, path: &Path) -> Result<Vec<Reading>, LoaderError> {
        info!(path = %path.display(), "loading readings CSV");

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let when_col = df
            .column("when")
            .map_err(|_| LoaderError::MissingColumn("when"))?
            .cast(&DataType::String)?;
        let value_col = df
            .column("value")
            .map_err(|_| LoaderError::MissingColumn("value"))?
            .cast(&DataType::Float64)?;
        let note_col = match df.column("note") {
            Ok(col) => Some(col.cast(&DataType::String)?),
            Err(_) => None,
        };

        let when_ca = when_col.as_materialized_series().str()?;
        let value_ca = value_col.as_materialized_series().f64()?;
        let note_ca = match &note_col {
            Some(col) => Some(col.as_materialized_series().str()?),
            None => None,
        };

        let mut readings = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let when = when_ca.get(row).unwrap_or_default();
            let when = self.parse_timestamp(when).ok_or_else(|| LoaderError::InvalidTimestamp {
                row: row + 1,
                value: when.to_string(),
            })?;
            let value = value_ca
                .get(row)
                .filter(|v| v.is_finite())
                .ok_or(LoaderError::MissingValue { row: row + 1 })?;
            let note = note_ca
                .and_then(|ca| ca.get(row))
                .filter(|n| !n.is_empty())
                .map(str::to_string);
            readings.push(Reading::new(when, value, note));
        }

        Ok(Self::sorted(readings))
    }

    pub fn load_json(&self, path: &Path) -> Result<Vec<Reading>, LoaderError> {
        info!(path = %path.display(), "loading readings JSON");
        let text = std::fs::read_to_string(path)?;
        self.parse_json(&text)
    }

    /// Parse `[{"when": "<timestamp>", "value": <number>}, ...]`.
    pub fn parse_json(&self, text: &str) -> Result<Vec<Reading>, LoaderError> {
        let raw: Vec<ApiReading> = serde_json::from_str(text)?;
        let readings = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let when = self
                    .parse_timestamp(&r.when)
                    .ok_or_else(|| LoaderError::InvalidTimestamp {
                        row: i + 1,
                        value: r.when.clone(),
                    })?;
                Ok(Reading::new(when, r.value, r.note))
            })
            .collect::<Result<Vec<_>, LoaderError>>()?;
        Ok(Self::sorted(readings))
    }

    /// RFC 3339 timestamps keep their offset; naive ones are local time.
    pub fn parse_timestamp(&self, text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS.iter().find_map(|format| {
            let naive = NaiveDateTime::parse_from_str(text, format).ok()?;
            let local = self.offset.from_local_datetime(&naive).single()?;
            Some(local.with_timezone(&Utc))
        })
    }

    /// Chronological order, oldest first.
    fn sorted(mut readings: Vec<Reading>) -> Vec<Reading> {
        readings.sort_by_key(|r| r.when);
        debug!(count = readings.len(), "readings loaded");
        readings
    }
}
