//! Free/occupied statistics for a week, independent of tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::block::FixedBlock;
use crate::error::ScheduleError;
use crate::grid::{GridConfig, WeekGrid};
use crate::occupancy::mark_fixed_blocks;
use crate::time::{date_for_day, week_start, ClockTime};

/// Free time left on one day after fixed blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub day_of_week: u8,
    pub date: NaiveDate,
    pub free_slots: usize,
    pub free_minutes: u32,
    /// Longest stretch of consecutive free slots, in minutes
    pub longest_free_minutes: u32,
}

/// Weekly availability summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekAvailability {
    pub week_start: NaiveDate,
    pub total_slots: usize,
    pub occupied_slots: usize,
    pub free_slots: usize,
    pub free_minutes: u32,
    /// `round(occupied / total * 100)`
    pub occupancy_percentage: u8,
    pub days: Vec<DayAvailability>,
}

/// Availability of the week containing `week_anchor` on the default grid.
pub fn week_availability(
    blocks: &[FixedBlock],
    week_anchor: NaiveDate,
) -> Result<WeekAvailability, ScheduleError> {
    week_availability_with_grid(GridConfig::default(), blocks, week_anchor)
}

/// Availability on a custom grid.
pub fn week_availability_with_grid(
    config: GridConfig,
    blocks: &[FixedBlock],
    week_anchor: NaiveDate,
) -> Result<WeekAvailability, ScheduleError> {
    let mut grid = WeekGrid::with_config(config)?;
    mark_fixed_blocks(&mut grid, blocks, week_anchor)?;
    Ok(summarize(&grid, week_start(week_anchor)))
}

/// Summarize an already-marked grid.
pub fn summarize(grid: &WeekGrid, start_of_week: NaiveDate) -> WeekAvailability {
    let step = grid.config().slot_minutes;
    let total = grid.total_slots();
    let free = grid.free_count();
    let occupied = total.saturating_sub(free);

    let days = grid
        .days()
        .map(|(day, slots)| DayAvailability {
            day_of_week: day,
            date: date_for_day(start_of_week, day),
            free_slots: slots.len(),
            free_minutes: slots.len() as u32 * u32::from(step),
            longest_free_minutes: longest_run(slots, step) as u32 * u32::from(step),
        })
        .collect();

    WeekAvailability {
        week_start: start_of_week,
        total_slots: total,
        occupied_slots: occupied,
        free_slots: free,
        free_minutes: free as u32 * u32::from(step),
        occupancy_percentage: rounded_percentage(occupied, total),
        days,
    }
}

/// Half-up rounding of `part / whole * 100`.
fn rounded_percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (2 * whole)).min(100) as u8
}

fn longest_run(slots: &[ClockTime], step: u16) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<ClockTime> = None;

    for slot in slots {
        current = match previous {
            Some(prev) if slot.minutes().checked_sub(prev.minutes()) == Some(step) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(*slot);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
    }

    #[test]
    fn empty_routine_is_fully_free() {
        let report = week_availability(&[], sunday()).unwrap();
        assert_eq!(report.total_slots, 238);
        assert_eq!(report.occupied_slots, 0);
        assert_eq!(report.free_slots, 238);
        assert_eq!(report.free_minutes, 238 * 30);
        assert_eq!(report.occupancy_percentage, 0);
        assert_eq!(report.days.len(), 7);
        assert!(report.days.iter().all(|d| d.longest_free_minutes == 17 * 60));
    }

    #[test]
    fn counts_weekday_work_blocks() {
        let blocks: Vec<FixedBlock> = (1..=5)
            .map(|day| FixedBlock::new("Work", BlockType::Work, day, t("09:00"), t("17:00")))
            .collect();
        let report = week_availability(&blocks, sunday()).unwrap();

        assert_eq!(report.occupied_slots, 80);
        assert_eq!(report.free_slots, 158);
        assert_eq!(report.free_minutes, 158 * 30);
        // 80 / 238 = 33.6%
        assert_eq!(report.occupancy_percentage, 34);

        let monday = &report.days[1];
        assert_eq!(monday.date, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
        assert_eq!(monday.free_slots, 18);
        // 17:00-23:00 beats 06:00-09:00
        assert_eq!(monday.longest_free_minutes, 360);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(119, 238), 50);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(238, 238), 100);
        assert_eq!(rounded_percentage(0, 0), 0);
    }

    #[test]
    fn respects_validity_windows() {
        let next_week = sunday() + chrono::Days::new(7);
        let blocks = vec![
            FixedBlock::new("Class", BlockType::Class, 2, t("08:00"), t("12:00"))
                .with_validity(Some(next_week), None),
        ];
        assert_eq!(week_availability(&blocks, sunday()).unwrap().occupied_slots, 0);
        assert_eq!(week_availability(&blocks, next_week).unwrap().occupied_slots, 8);
    }

    #[test]
    fn longest_run_counts_time_adjacency() {
        let slots: Vec<ClockTime> = ["06:00", "06:30", "08:00", "08:30", "09:00"]
            .iter()
            .map(|s| t(s))
            .collect();
        assert_eq!(longest_run(&slots, 30), 3);
        assert_eq!(longest_run(&[], 30), 0);
    }
}
