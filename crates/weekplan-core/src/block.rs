//! Recurring fixed commitments (work, classes, appointments).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::grid::GridConfig;
use crate::time::{date_prefix, ClockTime, DAYS_IN_WEEK};

/// Kind of commitment a block represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// Job or paid work
    Work,
    /// Lecture or course
    Class,
    /// Any other fixed appointment
    #[default]
    Fixed,
    /// Manually pinned task time
    Task,
}

/// A weekly commitment that removes `[start_time, end_time)` from one day.
///
/// The optional validity window bounds the calendar dates on which the block
/// recurs; both ends are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixedBlock {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    /// 0 = Sunday ... 6 = Saturday
    pub day_of_week: u8,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, with = "date_prefix", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    #[serde(default, with = "date_prefix", skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

impl FixedBlock {
    /// Create an unbounded block.
    pub fn new(
        title: impl Into<String>,
        block_type: BlockType,
        day_of_week: u8,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        let title = title.into();
        Self {
            id: format!("{}-{}-{}", title.to_lowercase().replace(' ', "-"), day_of_week, start_time),
            title,
            block_type,
            day_of_week,
            start_time,
            end_time,
            valid_from: None,
            valid_until: None,
        }
    }

    /// Restrict the recurrence to a date window.
    pub fn with_validity(mut self, valid_from: Option<NaiveDate>, valid_until: Option<NaiveDate>) -> Self {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
        self
    }

    fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Reject blocks that would silently corrupt the grid.
    pub fn validate(&self, grid: &GridConfig) -> Result<(), ScheduleError> {
        if self.day_of_week >= DAYS_IN_WEEK {
            return Err(ScheduleError::invalid_block(
                self.label(),
                format!("day_of_week {} is outside 0..=6", self.day_of_week),
            ));
        }
        if self.end_time <= self.start_time {
            return Err(ScheduleError::invalid_block(
                self.label(),
                format!(
                    "end_time {} must be after start_time {}",
                    self.end_time, self.start_time
                ),
            ));
        }
        for (field, time) in [("start_time", self.start_time), ("end_time", self.end_time)] {
            if !time.is_aligned(grid.slot_minutes) {
                return Err(ScheduleError::invalid_block(
                    self.label(),
                    format!("{field} {time} is not on the {}-minute grid", grid.slot_minutes),
                ));
            }
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if until < from {
                return Err(ScheduleError::invalid_block(
                    self.label(),
                    format!("valid_until {until} is before valid_from {from}"),
                ));
            }
        }
        Ok(())
    }

    /// Whether the occurrence on `date` falls inside the validity window.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        if self.valid_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.valid_until.is_some_and(|until| date > until) {
            return false;
        }
        true
    }

    /// Slot start times covered by this block on a grid of `slot_minutes` steps.
    pub fn occupied_slots(&self, slot_minutes: u16) -> Vec<ClockTime> {
        occupied_slots(self.start_time, self.end_time, slot_minutes)
    }

    /// Check if this block overlaps `[start, end)` on `day`.
    pub fn overlaps(&self, day: u8, start: ClockTime, end: ClockTime) -> bool {
        self.day_of_week == day && self.start_time < end && self.end_time > start
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

/// Slot start times in `[start, end)` stepping by `slot_minutes`.
///
/// `occupied_slots(09:00, 12:00, 30)` yields 09:00 through 11:30.
pub fn occupied_slots(start: ClockTime, end: ClockTime, slot_minutes: u16) -> Vec<ClockTime> {
    if slot_minutes == 0 {
        return Vec::new();
    }
    (start.minutes()..end.minutes())
        .step_by(usize::from(slot_minutes))
        .filter_map(ClockTime::from_minutes)
        .collect()
}
