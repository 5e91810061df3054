//! Clock-time and calendar helpers shared by every stage of the planner.
//!
//! Times of day are kept as minutes since midnight and only rendered as
//! zero-padded `HH:MM` at the serialization boundary.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Number of days in a planning week (0 = Sunday ... 6 = Saturday).
pub const DAYS_IN_WEEK: u8 = 7;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day on the minute grid, from `00:00` up to and including `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from minutes since midnight. `None` past `24:00`.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes <= MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Build from an hour/minute pair.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(u16::from(hour) * 60 + u16::from(minute))
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Shift forward, staying within the same day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }

    /// Whether this time sits on a boundary of a grid with `step` minute slots.
    pub fn is_aligned(self, step: u16) -> bool {
        step != 0 && self.0 % step == 0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// Reject days outside 0 (Sunday) ..= 6 (Saturday).
pub fn check_day(day: u8) -> Result<u8, ScheduleError> {
    if day < DAYS_IN_WEEK {
        Ok(day)
    } else {
        Err(ScheduleError::InvalidDay(day))
    }
}

/// Sunday that begins the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - Days::new(u64::from(offset))
}

/// Concrete calendar date of `day` in the week starting at `week_start`.
pub fn date_for_day(week_start: NaiveDate, day: u8) -> NaiveDate {
    week_start + Days::new(u64::from(day))
}

/// End of a `duration_minutes` span starting at `start`, if it stays within the day.
pub fn end_time(start: ClockTime, duration_minutes: u32) -> Option<ClockTime> {
    start.checked_add_minutes(duration_minutes)
}

/// Number of whole slots needed to hold `minutes` (rounded up).
pub fn slots_needed(minutes: u32, slot_minutes: u16) -> usize {
    if slot_minutes == 0 {
        return 0;
    }
    minutes.div_ceil(u32::from(slot_minutes)) as usize
}

/// Short English weekday label for a 0 = Sunday day index.
pub fn day_label(day: u8) -> &'static str {
    match day {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "???",
    }
}

/// Serde adapter for optional calendar dates.
///
/// Accepts plain `YYYY-MM-DD` as well as full ISO timestamps, keeping only the
/// date part (`2026-03-02T00:00:00.000Z` reads as 2026-03-02).
pub mod date_prefix {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        let date_part = value.split('T').next().unwrap_or(value).trim();
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
