//! Glucose Readings
//! Reading records, status classification and the label/value series fed to the chart.

use crate::charts::NORMAL_RANGE;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

/// Label format of a reading on the chart ("DD/MM/YYYY HH:mm").
pub const LABEL_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Above this value a reading calls for medical attention.
pub const EMERGENCY_THRESHOLD: f64 = 350.0;

/// Clinical status of a glucose value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlucoseStatus {
    Hypoglycemia,
    Normal,
    AboveTarget,
    SeekCare,
}

impl GlucoseStatus {
    pub fn classify(value: f64) -> Self {
        if value < NORMAL_RANGE.min {
            GlucoseStatus::Hypoglycemia
        } else if value <= NORMAL_RANGE.max {
            GlucoseStatus::Normal
        } else if value <= EMERGENCY_THRESHOLD {
            GlucoseStatus::AboveTarget
        } else {
            GlucoseStatus::SeekCare
        }
    }
}

impl fmt::Display for GlucoseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GlucoseStatus::Hypoglycemia => "Hypoglycemia",
            GlucoseStatus::Normal => "Normal",
            GlucoseStatus::AboveTarget => "Above target",
            GlucoseStatus::SeekCare => "Seek medical care",
        };
        f.write_str(text)
    }
}

/// One glucose measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub when: DateTime<Utc>,
    /// mg/dL
    pub value: f64,
    pub note: Option<String>,
    pub status: GlucoseStatus,
}

impl Reading {
    pub fn new(when: DateTime<Utc>, value: f64, note: Option<String>) -> Self {
        Self {
            when,
            value,
            note,
            status: GlucoseStatus::classify(value),
        }
    }

    /// Timestamp in the display offset.
    pub fn local_time(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.when.with_timezone(&offset)
    }

    /// Chart label in the display offset.
    pub fn label(&self, offset: FixedOffset) -> String {
        self.local_time(offset).format(LABEL_FORMAT).to_string()
    }
}

/// Parallel label and value sequences, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ReadingSeries {
    pub fn from_readings(readings: &[Reading], offset: FixedOffset) -> Self {
        let (labels, values) = readings
            .iter()
            .map(|r| (r.label(offset), r.value))
            .unzip();
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sao_paulo() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(GlucoseStatus::classify(69.9), GlucoseStatus::Hypoglycemia);
        assert_eq!(GlucoseStatus::classify(70.0), GlucoseStatus::Normal);
        assert_eq!(GlucoseStatus::classify(180.0), GlucoseStatus::Normal);
        assert_eq!(GlucoseStatus::classify(180.5), GlucoseStatus::AboveTarget);
        assert_eq!(GlucoseStatus::classify(350.0), GlucoseStatus::AboveTarget);
        assert_eq!(GlucoseStatus::classify(351.0), GlucoseStatus::SeekCare);
    }

    #[test]
    fn test_reading_label_uses_display_offset() {
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();
        let reading = Reading::new(when, 95.0, None);
        assert_eq!(reading.status, GlucoseStatus::Normal);
        assert_eq!(reading.label(sao_paulo()), "01/05/2024 08:00");
    }

    #[test]
    fn test_series_keeps_order() {
        let readings = vec![
            Reading::new(Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap(), 210.0, None),
            Reading::new(Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(), 95.0, None),
        ];
        let series = ReadingSeries::from_readings(&readings, sao_paulo());
        assert_eq!(series.labels, vec!["01/05/2024 12:00", "01/05/2024 08:00"]);
        assert_eq!(series.values, vec![210.0, 95.0]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GlucoseStatus::SeekCare.to_string(), "Seek medical care");
    }
}
