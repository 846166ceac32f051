// ============================================================================
// TIME SAMPLES AND SOURCES
// ============================================================================

use crate::error::{ClockError, Result};
use chrono::Timelike;
use std::str::FromStr;

/// Wall-clock reading on a 12-hour dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Builds a sample from a 12- or 24-hour reading. The hour is reduced
    /// modulo 12; minutes and seconds must be below 60.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self> {
        if minute >= 60 {
            return Err(ClockError::InvalidTime {
                field: "minute",
                value: minute,
            });
        }
        if second >= 60 {
            return Err(ClockError::InvalidTime {
                field: "second",
                value: second,
            });
        }
        Ok(Self {
            hour: (hour % 12) as u8,
            minute: minute as u8,
            second: second as u8,
        })
    }

    /// Samples any chrono time value. Leap seconds fold onto 59.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour12().1 as u8 % 12,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Clockwise degrees from 12 o'clock: `30·hour + 0.5·minute`.
    pub fn hour_angle(&self) -> f64 {
        normalize_degrees(30.0 * self.hour as f64 + 0.5 * self.minute as f64)
    }

    /// Clockwise degrees from 12 o'clock: `6·minute + 0.1·second`.
    pub fn minute_angle(&self) -> f64 {
        normalize_degrees(6.0 * self.minute as f64 + 0.1 * self.second as f64)
    }

    /// Clockwise degrees from 12 o'clock: `6·second`.
    pub fn second_angle(&self) -> f64 {
        normalize_degrees(6.0 * self.second as f64)
    }
}

/// Parses `HH:MM:SS` or `HH:MM`.
impl FromStr for TimeSample {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ClockError::TimeFormat(s.to_string());
        let fields = s
            .trim()
            .split(':')
            .map(|part| part.parse::<u32>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>>>()?;
        match fields.as_slice() {
            [hour, minute] => Self::new(*hour, *minute, 0),
            [hour, minute, second] => Self::new(*hour, *minute, *second),
            _ => Err(malformed()),
        }
    }
}

pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Where the face reads the current time from. Called once per render.
pub trait TimeSource {
    fn now(&self) -> TimeSample;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> TimeSample {
        TimeSample::from_time(&chrono::Local::now())
    }
}

/// Always reports the same sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub TimeSample);

impl TimeSource for FixedTime {
    fn now(&self) -> TimeSample {
        self.0
    }
}
