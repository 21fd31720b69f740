//! Reading Summary Module
//! Descriptive statistics and time-in-range figures for a set of readings.

use crate::charts::NORMAL_RANGE;
use crate::data::{GlucoseStatus, Reading};
use statrs::statistics::{Data, Distribution, Max, Median, Min};
use tracing::debug;

/// Latest reading figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub value: f64,
    pub status: GlucoseStatus,
    pub out_of_range: bool,
}

/// Summary of a set of readings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Percentages of readings below, within and above the normal range.
    pub pct_below: f64,
    pub pct_within: f64,
    pub pct_above: f64,
    pub latest: LatestReading,
}

impl ReadingSummary {
    /// Returns `None` when there are no readings.
    pub fn from_readings(readings: &[Reading]) -> Option<Self> {
        let latest = readings.iter().max_by_key(|r| r.when)?;
        let count = readings.len();

        let data = Data::new(readings.iter().map(|r| r.value).collect::<Vec<_>>());
        let mean = data.mean().unwrap_or(f64::NAN);
        let std = if count > 1 {
            data.std_dev().unwrap_or(0.0)
        } else {
            0.0
        };

        let below = readings.iter().filter(|r| r.value < NORMAL_RANGE.min).count();
        let above = readings.iter().filter(|r| r.value > NORMAL_RANGE.max).count();
        let within = count - below - above;
        let pct = |n: usize| n as f64 * 100.0 / count as f64;

        let summary = Self {
            count,
            mean,
            std,
            median: data.median(),
            min: data.min(),
            max: data.max(),
            pct_below: pct(below),
            pct_within: pct(within),
            pct_above: pct(above),
            latest: LatestReading {
                value: latest.value,
                status: latest.status,
                out_of_range: !NORMAL_RANGE.contains(latest.value),
            },
        };
        debug!(count, mean = summary.mean, "reading summary computed");
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(hour: u32, value: f64) -> Reading {
        Reading::new(Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(), value, None)
    }

    #[test]
    fn test_empty_readings() {
        assert_eq!(ReadingSummary::from_readings(&[]), None);
    }

    #[test]
    fn test_summary_figures() {
        let readings = vec![
            reading(8, 60.0),
            reading(10, 100.0),
            reading(12, 140.0),
            reading(14, 200.0),
        ];
        let summary = ReadingSummary::from_readings(&readings).unwrap();

        assert_eq!(summary.count, 4);
        assert!((summary.mean - 125.0).abs() < 1e-9);
        assert!((summary.median - 120.0).abs() < 1e-9);
        assert_eq!(summary.min, 60.0);
        assert_eq!(summary.max, 200.0);
        assert!((summary.std - (10700.0_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(summary.pct_below, 25.0);
        assert_eq!(summary.pct_within, 50.0);
        assert_eq!(summary.pct_above, 25.0);
    }

    #[test]
    fn test_latest_is_most_recent_not_last() {
        let readings = vec![reading(14, 95.0), reading(8, 400.0)];
        let summary = ReadingSummary::from_readings(&readings).unwrap();
        assert_eq!(summary.latest.value, 95.0);
        assert_eq!(summary.latest.status, GlucoseStatus::Normal);
        assert!(!summary.latest.out_of_range);
    }

    #[test]
    fn test_single_reading() {
        let summary = ReadingSummary::from_readings(&[reading(8, 250.0)]).unwrap();
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.latest.status, GlucoseStatus::AboveTarget);
        assert!(summary.latest.out_of_range);
        assert_eq!(summary.pct_above, 100.0);
    }
}
