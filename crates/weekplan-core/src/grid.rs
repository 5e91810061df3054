//! Weekly slot grid.
//!
//! A [`WeekGrid`] holds, for each day of the week, the ordered list of slots
//! that are still free. A pristine grid covers every slot from the day start
//! hour up to (not including) the day end hour; fixed blocks and placed tasks
//! only ever remove slots from it.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::time::{check_day, ClockTime, DAYS_IN_WEEK};

/// First schedulable hour of the day.
pub const DAY_START_HOUR: u8 = 6;
/// Hour at which the last slot ends.
pub const DAY_END_HOUR: u8 = 23;
/// Length of one slot in minutes.
pub const SLOT_DURATION_MINUTES: u16 = 30;

const ALLOWED_SLOT_MINUTES: [u16; 6] = [5, 10, 15, 20, 30, 60];

/// Shape of the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u8,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u8,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u16,
}

fn default_day_start_hour() -> u8 {
    DAY_START_HOUR
}
fn default_day_end_hour() -> u8 {
    DAY_END_HOUR
}
fn default_slot_minutes() -> u16 {
    SLOT_DURATION_MINUTES
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            day_start_hour: DAY_START_HOUR,
            day_end_hour: DAY_END_HOUR,
            slot_minutes: SLOT_DURATION_MINUTES,
        }
    }
}

impl GridConfig {
    /// Check that the settings describe a usable grid.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !ALLOWED_SLOT_MINUTES.contains(&self.slot_minutes) {
            return Err(ScheduleError::InvalidGrid(format!(
                "slot_minutes must be one of {:?}, got {}",
                ALLOWED_SLOT_MINUTES, self.slot_minutes
            )));
        }
        if self.day_end_hour > 24 {
            return Err(ScheduleError::InvalidGrid(format!(
                "day_end_hour must be at most 24, got {}",
                self.day_end_hour
            )));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(ScheduleError::InvalidGrid(format!(
                "day_start_hour ({}) must be before day_end_hour ({})",
                self.day_start_hour, self.day_end_hour
            )));
        }
        Ok(())
    }

    pub fn day_start(&self) -> ClockTime {
        ClockTime::from_hm(self.day_start_hour, 0).unwrap_or(ClockTime::MIDNIGHT)
    }

    pub fn day_end(&self) -> ClockTime {
        ClockTime::from_hm(self.day_end_hour, 0).unwrap_or(ClockTime::MIDNIGHT)
    }

    /// Slots in one pristine day (34 with the default settings).
    pub fn slots_per_day(&self) -> usize {
        let span = self.day_end().minutes().saturating_sub(self.day_start().minutes());
        if self.slot_minutes == 0 {
            return 0;
        }
        usize::from(span / self.slot_minutes)
    }

    /// Slots in one pristine week (238 with the default settings).
    pub fn slots_per_week(&self) -> usize {
        self.slots_per_day() * usize::from(DAYS_IN_WEEK)
    }

    /// Every slot of a pristine day, in order.
    pub fn day_slots(&self) -> Vec<ClockTime> {
        let start = self.day_start().minutes();
        (0..self.slots_per_day())
            .filter_map(|i| ClockTime::from_minutes(start + i as u16 * self.slot_minutes))
            .collect()
    }
}

/// Free slots per day for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    config: GridConfig,
    days: [Vec<ClockTime>; DAYS_IN_WEEK as usize],
}

impl WeekGrid {
    /// Pristine grid with the default 06:00-23:00, 30-minute layout.
    pub fn new() -> Self {
        Self::build(GridConfig::default())
    }

    /// Pristine grid for custom settings.
    pub fn with_config(config: GridConfig) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GridConfig) -> Self {
        let day = config.day_slots();
        Self {
            config,
            days: std::array::from_fn(|_| day.clone()),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Free slots of one day, in increasing time order.
    pub fn day(&self, day: u8) -> Result<&[ClockTime], ScheduleError> {
        let day = check_day(day)?;
        Ok(&self.days[usize::from(day)])
    }

    /// `(day, free slots)` for every day, Sunday first.
    pub fn days(&self) -> impl Iterator<Item = (u8, &[ClockTime])> {
        self.days
            .iter()
            .enumerate()
            .map(|(i, slots)| (i as u8, slots.as_slice()))
    }

    /// Whether the slot starting at `time` on `day` is still free.
    pub fn is_free(&self, day: u8, time: ClockTime) -> bool {
        self.day(day)
            .map(|slots| slots.binary_search(&time).is_ok())
            .unwrap_or(false)
    }

    pub fn total_slots(&self) -> usize {
        self.config.slots_per_week()
    }

    pub fn free_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn occupied_count(&self) -> usize {
        self.total_slots().saturating_sub(self.free_count())
    }

    /// Remove every free slot of `day` whose start lies in `[start, end)`.
    ///
    /// Returns how many slots were removed.
    pub fn occupy(&mut self, day: u8, start: ClockTime, end: ClockTime) -> Result<usize, ScheduleError> {
        let day = check_day(day)?;
        let slots = &mut self.days[usize::from(day)];
        let before = slots.len();
        slots.retain(|slot| *slot < start || *slot >= end);
        Ok(before - slots.len())
    }

    /// Remove `len` slots starting at index `start` of `day` and return them.
    pub fn take_run(&mut self, day: u8, start: usize, len: usize) -> Result<Vec<ClockTime>, ScheduleError> {
        let day = check_day(day)?;
        let slots = &mut self.days[usize::from(day)];
        let end = start.saturating_add(len).min(slots.len());
        Ok(slots.drain(start.min(end)..end).collect())
    }
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn pristine_grid_has_238_slots() {
        let grid = WeekGrid::new();
        assert_eq!(grid.total_slots(), 238);
        assert_eq!(grid.free_count(), 238);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn each_day_runs_from_0600_to_2230_in_30_minute_steps() {
        let grid = WeekGrid::new();
        for (_, slots) in grid.days() {
            assert_eq!(slots.len(), 34);
            assert_eq!(slots.first().unwrap().to_string(), "06:00");
            assert_eq!(slots.last().unwrap().to_string(), "22:30");
            for pair in slots.windows(2) {
                assert_eq!(pair[1].minutes() - pair[0].minutes(), 30);
            }
        }
    }

    #[test]
    fn day_rejects_out_of_range_index() {
        let grid = WeekGrid::new();
        assert_eq!(grid.day(7).unwrap_err(), ScheduleError::InvalidDay(7));
    }

    #[test]
    fn occupy_is_half_open() {
        let mut grid = WeekGrid::new();
        let removed = grid.occupy(1, t("09:00"), t("12:00")).unwrap();
        assert_eq!(removed, 6);
        assert!(!grid.is_free(1, t("09:00")));
        assert!(!grid.is_free(1, t("11:30")));
        assert!(grid.is_free(1, t("12:00")));
        assert!(grid.is_free(1, t("08:30")));
        assert_eq!(grid.day(0).unwrap().len(), 34);
    }

    #[test]
    fn take_run_drains_the_requested_slots() {
        let mut grid = WeekGrid::new();
        let run = grid.take_run(0, 0, 2).unwrap();
        assert_eq!(run, vec![t("06:00"), t("06:30")]);
        assert_eq!(grid.day(0).unwrap().first().copied(), Some(t("07:00")));
        assert_eq!(grid.free_count(), 236);
    }

    #[test]
    fn custom_config_changes_shape() {
        let config = GridConfig {
            day_start_hour: 8,
            day_end_hour: 18,
            slot_minutes: 60,
        };
        let grid = WeekGrid::with_config(config).unwrap();
        assert_eq!(grid.day(3).unwrap().len(), 10);
        assert_eq!(grid.total_slots(), 70);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let bad_step = GridConfig {
            slot_minutes: 7,
            ..GridConfig::default()
        };
        assert!(matches!(bad_step.validate(), Err(ScheduleError::InvalidGrid(_))));

        let inverted = GridConfig {
            day_start_hour: 20,
            day_end_hour: 8,
            ..GridConfig::default()
        };
        assert!(WeekGrid::with_config(inverted).is_err());

        let past_midnight = GridConfig {
            day_end_hour: 25,
            ..GridConfig::default()
        };
        assert!(past_midnight.validate().is_err());
    }
}
