use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

pub fn parse_zone(timezone: &str) -> Result<Tz, TimeFormatError> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| TimeFormatError::UnknownZone(timezone.to_string()))
}

/// Formats `instant` as a 12-hour wall clock reading (`h:mm:ss AM`) in `timezone`.
pub fn zoned_clock(instant: DateTime<Utc>, timezone: &str) -> Result<String, TimeFormatError> {
    let zone = parse_zone(timezone)?;
    Ok(clock_in(instant, zone))
}

#[must_use]
pub fn clock_in(instant: DateTime<Utc>, zone: Tz) -> String {
    instant
        .with_timezone(&zone)
        .format("%-I:%M:%S %p")
        .to_string()
}

#[must_use]
pub fn duration_breakdown(total_seconds: u64) -> DurationBreakdown {
    DurationBreakdown {
        hours: total_seconds / 3600,
        minutes: (total_seconds % 3600) / 60,
        seconds: total_seconds % 60,
    }
}
