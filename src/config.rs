//! Application Configuration
//! Settings read from the environment (and a `.env` file when present).

use chrono::{FixedOffset, Offset, Utc};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_READINGS: &str = "GLUCOSE_READINGS";
pub const ENV_UTC_OFFSET: &str = "GLUCOSE_UTC_OFFSET";
pub const ENV_CHART_WIDTH: &str = "GLUCOSE_CHART_WIDTH";
pub const ENV_CHART_HEIGHT: &str = "GLUCOSE_CHART_HEIGHT";

/// Display offset used when none is configured (America/Sao_Paulo).
pub const DEFAULT_UTC_OFFSET_SECS: i32 = -3 * 3600;
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 480;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name}: invalid UTC offset '{value}' (expected e.g. -03:00)")]
    InvalidOffset { name: &'static str, value: String },
    #[error("{name}: invalid chart dimension '{value}'")]
    InvalidDimension { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Readings file opened at startup.
    pub readings_path: Option<PathBuf>,
    /// Offset used to label readings and to read naive timestamps.
    pub utc_offset: FixedOffset,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            readings_path: None,
            utc_offset: default_offset(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_READINGS) {
            config.readings_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(value) = get(ENV_UTC_OFFSET) {
            config.utc_offset = parse_offset(&value).ok_or(ConfigError::InvalidOffset {
                name: ENV_UTC_OFFSET,
                value,
            })?;
        }
        if let Some(value) = get(ENV_CHART_WIDTH) {
            config.chart_width = parse_dimension(ENV_CHART_WIDTH, value)?;
        }
        if let Some(value) = get(ENV_CHART_HEIGHT) {
            config.chart_height = parse_dimension(ENV_CHART_HEIGHT, value)?;
        }

        Ok(config)
    }
}

fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parses `Z`, `+HH:MM`, `-HH:MM`, `+HHMM` or `-HH`.
pub fn parse_offset(text: &str) -> Option<FixedOffset> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_dimension(name: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidDimension { name, value }),
    }
}
