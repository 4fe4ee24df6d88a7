use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::grid::{SLOTS_PER_HOUR, START_HOUR};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("empty time token")]
    Empty,
    #[error("no end time in range {0:?}")]
    MissingEnd(String),
    #[error("missing AM/PM marker in {0:?}")]
    MissingMeridiem(String),
    #[error("missing ':' in {0:?}")]
    MissingColon(String),
    #[error("invalid hour in {0:?}")]
    InvalidHour(String),
    #[error("invalid minute in {0:?}")]
    InvalidMinute(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A 12-hour wall clock reading such as `12:20PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl ClockTime {
    pub fn to_time(self) -> Time {
        let hour = match (self.meridiem, self.hour) {
            (Meridiem::Pm, h) if h != 12 => h + 12,
            (Meridiem::Am, 12) => 0,
            (_, h) => h,
        };
        Time(hour as u16 * 60 + self.minute as u16)
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let (clock, meridiem) = if let Some(clock) = token.strip_suffix("AM") {
            (clock, Meridiem::Am)
        } else if let Some(clock) = token.strip_suffix("PM") {
            (clock, Meridiem::Pm)
        } else {
            return Err(TimeParseError::MissingMeridiem(token.to_string()));
        };

        let (hour, minute) = clock
            .split_once(':')
            .ok_or_else(|| TimeParseError::MissingColon(token.to_string()))?;

        let hour = Some(hour)
            .filter(|h| (1..=2).contains(&h.len()) && h.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|h| h.parse::<u8>().ok())
            .filter(|h| (1..=12).contains(h))
            .ok_or_else(|| TimeParseError::InvalidHour(token.to_string()))?;
        let minute = Some(minute)
            .filter(|m| m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|m| m.parse::<u8>().ok())
            .filter(|m| *m < 60)
            .ok_or_else(|| TimeParseError::InvalidMinute(token.to_string()))?;

        Ok(ClockTime { hour, minute, meridiem })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.meridiem {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        };
        write!(f, "{}:{:02}{}", self.hour, self.minute, marker)
    }
}

/// Minutes past midnight.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct Time(pub u16);

impl Time {
    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Add<u16> for Time {
    type Output = Self;

    fn add(self, rhs: u16) -> Self::Output {
        Time(self.0 + rhs)
    }
}

/// Both sides of a `"<start> - <end>"` range, each parsed independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Result<ClockTime, TimeParseError>,
    pub end: Result<ClockTime, TimeParseError>,
}

impl TimeRange {
    pub const SEPARATOR: &'static str = " - ";

    pub fn parse(raw: &str) -> TimeRange {
        match raw.split_once(Self::SEPARATOR) {
            Some((start, end)) => TimeRange {
                start: start.parse(),
                end: end.parse(),
            },
            None => TimeRange {
                start: raw.parse(),
                end: Err(TimeParseError::MissingEnd(raw.to_string())),
            },
        }
    }

    /// Wall-clock bounds, only when both sides parsed.
    pub fn bounds(&self) -> Option<(Time, Time)> {
        match (&self.start, &self.end) {
            (Ok(start), Ok(end)) => Some((start.to_time(), end.to_time())),
            _ => None,
        }
    }
}

/// Index of a 15-minute row on the weekly grid. Values outside the grid are
/// legal here and get filtered when events are positioned.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Serialize, Deserialize, PartialOrd, Hash)]
pub struct Slot(pub i32);

impl Slot {
    pub fn from_time(time: Time) -> Slot {
        let hour = time.hour() as i32;
        let minute = time.minute() as i32;
        Slot((hour - START_HOUR as i32) * SLOTS_PER_HOUR as i32 + minute / 15)
    }

    /// Wall-clock time at the top of this slot.
    pub fn start_time(self) -> Option<Time> {
        let minutes = START_HOUR as i32 * 60 + self.0 * 15;
        u16::try_from(minutes).ok().map(Time)
    }
}

impl Add<i32> for Slot {
    type Output = Self;

    fn add(self, rhs: i32) -> Self::Output {
        Slot(self.0 + rhs)
    }
}

impl Sub<Slot> for Slot {
    type Output = i32;

    fn sub(self, rhs: Slot) -> Self::Output {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_afternoon() {
        let t = clock("12:20PM");
        assert_eq!(ClockTime { hour: 12, minute: 20, meridiem: Meridiem::Pm }, t);
        assert_eq!(Time(12 * 60 + 20), t.to_time());
        assert_eq!(Time(13 * 60 + 5), clock("1:05PM").to_time());
    }

    #[test]
    fn test_parse_midnight_and_leading_zero() {
        assert_eq!(Time(0), clock("12:00AM").to_time());
        assert_eq!(Time(8 * 60), clock("08:00AM").to_time());
        assert_eq!(Time(11 * 60 + 59), clock("11:59AM").to_time());
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(Err(TimeParseError::Empty), "".parse::<ClockTime>());
        assert_eq!(
            Err(TimeParseError::MissingMeridiem("noon".to_string())),
            "noon".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::MissingMeridiem("8:00".to_string())),
            "8:00".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::MissingColon("800AM".to_string())),
            "800AM".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::InvalidHour("13:00PM".to_string())),
            "13:00PM".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::InvalidHour("0:30AM".to_string())),
            "0:30AM".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::InvalidMinute("8:60AM".to_string())),
            "8:60AM".parse::<ClockTime>()
        );
        assert_eq!(
            Err(TimeParseError::InvalidMinute("8:5AM".to_string())),
            "8:5AM".parse::<ClockTime>()
        );
        assert!("8:00 AM".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!("9:05AM", clock("09:05AM").to_string());
        assert_eq!("13:05", clock("1:05PM").to_time().to_string());
    }

    #[test]
    fn test_slot_mapping() {
        assert_eq!(Slot(0), Slot::from_time(clock("7:00AM").to_time()));
        assert_eq!(Slot(4), Slot::from_time(clock("8:00AM").to_time()));
        assert_eq!(Slot(7), Slot::from_time(clock("8:50AM").to_time()));
        assert_eq!(Slot(-4), Slot::from_time(clock("6:00AM").to_time()));
        assert_eq!(Slot(56), Slot::from_time(clock("9:00PM").to_time()));
    }

    #[test]
    fn test_slot_start_time() {
        assert_eq!(Some(Time(7 * 60)), Slot(0).start_time());
        assert_eq!(Some(Time(8 * 60 + 15)), Slot(5).start_time());
        assert_eq!(None, Slot(-40).start_time());
    }

    #[test]
    fn test_range_parse() {
        let range = TimeRange::parse("8:00AM - 8:50AM");
        assert_eq!(Some((Time(480), Time(530))), range.bounds());

        let single = TimeRange::parse("8:00AM");
        assert_eq!(Ok(clock("8:00AM")), single.start);
        assert_eq!(Err(TimeParseError::MissingEnd("8:00AM".to_string())), single.end);
        assert_eq!(None, single.bounds());
    }

    #[test]
    fn test_overlap() {
        assert!(Time::is_overlapping(&(Time(10), Time(20)), &(Time(15), Time(30))));
        assert!(!Time::is_overlapping(&(Time(10), Time(20)), &(Time(20), Time(30))));
    }
}
