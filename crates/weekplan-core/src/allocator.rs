//! Greedy weekly allocator.
//!
//! Places prioritized tasks into a week grid one at a time:
//! - each task needs `ceil(minutes / slot)` consecutive free slots
//! - days are searched Sunday (0) through Saturday (6); the first fit wins
//! - placed slots leave the pool, so later tasks cannot reuse them
//! - a task that fits nowhere is reported as unplaced and the loop moves on
//!
//! There is no backtracking: earlier placements are never revisited, which
//! keeps the result deterministic for a given input but not optimal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::block::FixedBlock;
use crate::error::ScheduleError;
use crate::grid::{GridConfig, WeekGrid};
use crate::id::{IdSource, RandomIds};
use crate::occupancy::mark_fixed_blocks;
use crate::priority::prioritize_tasks;
use crate::search::find_consecutive_run;
use crate::task::Task;
use crate::time::{date_for_day, end_time, slots_needed, week_start, ClockTime, DAYS_IN_WEEK};

/// A task placed on a concrete day and time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: String,
    pub task_id: String,
    /// Copy of the task as it was when planned
    pub task: Task,
    /// 0 = Sunday ... 6 = Saturday
    pub day_of_week: u8,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub date: NaiveDate,
}

impl ScheduledTask {
    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    /// Check if this placement overlaps `[start, end)` on `day`.
    pub fn overlaps(&self, day: u8, start: ClockTime, end: ClockTime) -> bool {
        self.day_of_week == day && self.start_time < end && self.end_time > start
    }

    pub fn overlaps_block(&self, block: &FixedBlock) -> bool {
        self.overlaps(block.day_of_week, block.start_time, block.end_time)
    }
}

/// A task that found no contiguous room anywhere in the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedTask {
    pub task_id: String,
    pub title: String,
    pub estimated_minutes: u32,
    pub slots_needed: usize,
}

/// Outcome of one allocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// Sunday the plan's dates are resolved from
    pub week_start: NaiveDate,
    /// Placements in the order tasks were processed
    pub scheduled: Vec<ScheduledTask>,
    pub unplaced: Vec<UnplacedTask>,
}

impl WeekPlan {
    /// Whether every eligible task was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn scheduled_minutes(&self) -> u32 {
        self.scheduled.iter().map(|s| u32::from(s.duration_minutes())).sum()
    }

    /// Placements on one day, ordered by start time.
    pub fn for_day(&self, day: u8) -> Vec<&ScheduledTask> {
        let mut placements: Vec<_> = self.scheduled.iter().filter(|s| s.day_of_week == day).collect();
        placements.sort_by_key(|s| s.start_time);
        placements
    }
}

/// Greedy allocator over a week grid.
pub struct WeekAllocator<I = RandomIds> {
    grid: GridConfig,
    ids: I,
}

impl WeekAllocator<RandomIds> {
    /// Create an allocator with the default grid and random ids
    pub fn new() -> Self {
        Self {
            grid: GridConfig::default(),
            ids: RandomIds,
        }
    }

    /// Create with custom grid settings
    pub fn with_grid(grid: GridConfig) -> Result<Self, ScheduleError> {
        grid.validate()?;
        Ok(Self { grid, ids: RandomIds })
    }
}

impl Default for WeekAllocator<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> WeekAllocator<I> {
    /// Swap the id source, e.g. for reproducible ids in tests.
    pub fn with_id_source<J: IdSource>(self, ids: J) -> WeekAllocator<J> {
        WeekAllocator { grid: self.grid, ids }
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    /// Plan the week containing `week_anchor`.
    ///
    /// # Arguments
    /// * `blocks` - Recurring commitments to keep free
    /// * `tasks` - All tasks; ineligible ones are filtered out
    /// * `week_anchor` - Any date in the target week (weeks start on Sunday)
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidBlock`] if any block is malformed.
    pub fn plan_week(
        &mut self,
        blocks: &[FixedBlock],
        tasks: &[Task],
        week_anchor: NaiveDate,
    ) -> Result<WeekPlan, ScheduleError> {
        let mut grid = WeekGrid::with_config(self.grid)?;
        mark_fixed_blocks(&mut grid, blocks, week_anchor)?;
        let prioritized = prioritize_tasks(tasks);
        self.allocate(&mut grid, &prioritized, week_anchor)
    }

    /// Place already-prioritized `tasks` into `grid`, consuming slots as it goes.
    ///
    /// Tasks are processed in the given order. Tasks with a non-positive
    /// duration are rejected, since they should have been filtered out by
    /// [`prioritize_tasks`]. All durations are checked before the grid is
    /// touched, so on error `grid` is unchanged.
    pub fn allocate(
        &mut self,
        grid: &mut WeekGrid,
        tasks: &[Task],
        week_anchor: NaiveDate,
    ) -> Result<WeekPlan, ScheduleError> {
        let durations = tasks
            .iter()
            .map(positive_minutes)
            .collect::<Result<Vec<u32>, _>>()?;

        let start_of_week = week_start(week_anchor);
        let step = grid.config().slot_minutes;
        let mut plan = WeekPlan {
            week_start: start_of_week,
            scheduled: Vec::new(),
            unplaced: Vec::new(),
        };

        for (task, minutes) in tasks.iter().zip(durations) {
            let needed = slots_needed(minutes, step);

            match self.place(grid, task, needed, start_of_week)? {
                Some(scheduled) => {
                    debug!(
                        task_id = %task.id,
                        day = scheduled.day_of_week,
                        start = %scheduled.start_time,
                        end = %scheduled.end_time,
                        "Placed task"
                    );
                    plan.scheduled.push(scheduled);
                }
                None => {
                    warn!(
                        task_id = %task.id,
                        title = %task.title,
                        minutes,
                        slots = needed,
                        "No free slot for task \"{}\" ({}min = {} slots)",
                        task.title,
                        minutes,
                        needed
                    );
                    plan.unplaced.push(UnplacedTask {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        estimated_minutes: minutes,
                        slots_needed: needed,
                    });
                }
            }
        }

        info!(
            week_start = %start_of_week,
            scheduled = plan.scheduled.len(),
            unplaced = plan.unplaced.len(),
            "Week plan complete"
        );
        Ok(plan)
    }

    /// Search days 0..=6 for the first run of `needed` slots and consume it.
    fn place(
        &mut self,
        grid: &mut WeekGrid,
        task: &Task,
        needed: usize,
        start_of_week: NaiveDate,
    ) -> Result<Option<ScheduledTask>, ScheduleError> {
        let step = grid.config().slot_minutes;

        for day in 0..DAYS_IN_WEEK {
            let Some(start_index) = find_consecutive_run(grid.day(day)?, needed, step) else {
                continue;
            };

            let run = grid.take_run(day, start_index, needed)?;
            let start_time = run[0];
            let span = needed as u32 * u32::from(step);
            let end = end_time(start_time, span).ok_or_else(|| ScheduleError::InvalidTask {
                task: task.id.clone(),
                reason: format!("{span} minutes from {start_time} runs past midnight"),
            })?;

            return Ok(Some(ScheduledTask {
                id: self.ids.next_id(),
                task_id: task.id.clone(),
                task: task.clone(),
                day_of_week: day,
                start_time,
                end_time: end,
                date: date_for_day(start_of_week, day),
            }));
        }

        Ok(None)
    }
}

fn positive_minutes(task: &Task) -> Result<u32, ScheduleError> {
    u32::try_from(task.estimated_minutes)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| ScheduleError::InvalidTask {
            task: task.id.clone(),
            reason: format!("estimated_minutes must be positive, got {}", task.estimated_minutes),
        })
}

/// Plan the week with default settings, keeping the unplaced-task report.
pub fn plan_week(
    blocks: &[FixedBlock],
    tasks: &[Task],
    week_anchor: NaiveDate,
) -> Result<WeekPlan, ScheduleError> {
    WeekAllocator::new().plan_week(blocks, tasks, week_anchor)
}

/// Plan the week with default settings and return only the placements.
pub fn schedule_tasks_in_week(
    blocks: &[FixedBlock],
    tasks: &[Task],
    week_anchor: NaiveDate,
) -> Result<Vec<ScheduledTask>, ScheduleError> {
    plan_week(blocks, tasks, week_anchor).map(|plan| plan.scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::task::{TaskPriority, TaskStatus};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    struct SequentialIds(u32);

    impl IdSource for SequentialIds {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            format!("s{}", self.0)
        }
    }

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 18, 8, 0, 0).unwrap()
    }

    fn task(id: &str, minutes: i32, priority: TaskPriority) -> Task {
        Task::new(id, format!("Task {id}"), minutes, priority, now() + Duration::days(1))
    }

    fn allocator() -> WeekAllocator<SequentialIds> {
        WeekAllocator::new().with_id_source(SequentialIds(0))
    }

    #[test]
    fn first_task_lands_sunday_morning() {
        let blocks = vec![FixedBlock::new("Work", BlockType::Work, 1, t("09:00"), t("17:00"))];
        let tasks = vec![task("study", 60, TaskPriority::High)];

        let plan = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();

        assert_eq!(plan.scheduled.len(), 1);
        let placed = &plan.scheduled[0];
        assert_eq!(placed.day_of_week, 0);
        assert_eq!(placed.start_time.to_string(), "06:00");
        assert_eq!(placed.end_time.to_string(), "07:00");
        assert_eq!(placed.date, sunday());
        assert_eq!(placed.task_id, "study");
        assert_eq!(placed.id, "s1");
        assert!(plan.is_complete());
    }

    #[test]
    fn partial_slots_round_up() {
        let tasks = vec![task("short", 45, TaskPriority::Medium)];
        let plan = allocator().plan_week(&[], &tasks, sunday()).unwrap();
        assert_eq!(plan.scheduled[0].end_time.to_string(), "07:00");
        assert_eq!(plan.scheduled[0].duration_minutes(), 60);
    }

    #[test]
    fn placements_consume_slots_in_priority_order() {
        let tasks = vec![
            task("low", 30, TaskPriority::Low),
            task("high", 60, TaskPriority::High),
            task("medium", 30, TaskPriority::Medium),
        ];
        let plan = allocator().plan_week(&[], &tasks, sunday()).unwrap();
        let order: Vec<(&str, String)> = plan
            .scheduled
            .iter()
            .map(|s| (s.task_id.as_str(), s.start_time.to_string()))
            .collect();
        assert_eq!(
            order,
            [
                ("high", "06:00".to_string()),
                ("medium", "07:00".to_string()),
                ("low", "07:30".to_string()),
            ]
        );
    }

    #[test]
    fn long_task_skips_to_a_day_with_room() {
        // Sunday only has 06:00-08:00 free before a long block.
        let blocks = vec![FixedBlock::new("Trip", BlockType::Fixed, 0, t("08:00"), t("23:00"))];
        let tasks = vec![task("deep", 180, TaskPriority::High)];
        let plan = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();
        assert_eq!(plan.scheduled[0].day_of_week, 1);
        assert_eq!(plan.scheduled[0].start_time.to_string(), "06:00");
        assert_eq!(plan.scheduled[0].date, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
    }

    #[test]
    fn runs_across_a_removed_slot_are_not_bridged() {
        // 06:00 and 06:30 sit next to 07:30 in the free list once 07:00 is taken.
        let blocks = vec![FixedBlock::new("Call", BlockType::Fixed, 0, t("07:00"), t("07:30"))];
        let tasks = vec![
            task("a", 90, TaskPriority::High),
            task("b", 60, TaskPriority::Medium),
        ];
        let plan = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();
        assert_eq!(plan.scheduled[0].start_time.to_string(), "07:30");
        assert_eq!(plan.scheduled[0].end_time.to_string(), "09:00");
        assert_eq!(plan.scheduled[1].start_time.to_string(), "06:00");
        assert_eq!(plan.scheduled[1].day_of_week, 0);
    }

    #[test]
    fn infeasible_task_is_reported_and_others_still_placed() {
        // Every day blocked 12:00-18:00: longest free run is 06:00-12:00 (12 slots).
        let blocks: Vec<FixedBlock> = (0..7)
            .map(|day| FixedBlock::new("Busy", BlockType::Work, day, t("12:00"), t("18:00")))
            .collect();
        let tasks = vec![
            task("huge", 600, TaskPriority::High),
            task("small", 30, TaskPriority::Low),
        ];
        let plan = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();

        assert_eq!(plan.scheduled.len(), 1);
        assert_eq!(plan.scheduled[0].task_id, "small");
        assert_eq!(
            plan.unplaced,
            vec![UnplacedTask {
                task_id: "huge".into(),
                title: "Task huge".into(),
                estimated_minutes: 600,
                slots_needed: 20,
            }]
        );
        assert!(!plan.is_complete());
    }

    #[test]
    fn ineligible_tasks_never_appear() {
        let tasks = vec![
            task("done", 30, TaskPriority::High).with_status(TaskStatus::Completed),
            task("cancelled", 30, TaskPriority::High).with_status(TaskStatus::Cancelled),
            task("zero", 0, TaskPriority::High),
        ];
        let plan = allocator().plan_week(&[], &tasks, sunday()).unwrap();
        assert!(plan.scheduled.is_empty());
        assert!(plan.unplaced.is_empty());
    }

    #[test]
    fn allocate_rejects_non_positive_duration() {
        let mut grid = WeekGrid::new();
        let tasks = vec![task("zero", 0, TaskPriority::High)];
        let err = allocator().allocate(&mut grid, &tasks, sunday()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTask { ref task, .. } if task == "zero"));
    }

    #[test]
    fn allocate_error_leaves_grid_untouched() {
        let mut grid = WeekGrid::new();
        let tasks = vec![task("ok", 120, TaskPriority::High), task("bad", 0, TaskPriority::Low)];
        let err = allocator().allocate(&mut grid, &tasks, sunday()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTask { ref task, .. } if task == "bad"));
        assert_eq!(grid, WeekGrid::new());
        assert_eq!(grid.free_count(), 238);
    }

    #[test]
    fn allocate_shrinks_the_callers_grid() {
        let mut grid = WeekGrid::new();
        let tasks = vec![task("a", 90, TaskPriority::High)];
        allocator().allocate(&mut grid, &tasks, sunday()).unwrap();
        assert_eq!(grid.free_count(), 235);
        assert!(!grid.is_free(0, t("07:00")));
        assert!(grid.is_free(0, t("07:30")));
    }

    #[test]
    fn mid_week_anchor_resolves_dates_from_sunday() {
        let thursday = NaiveDate::from_ymd_opt(2026, 1, 22).unwrap();
        let plan = allocator()
            .plan_week(&[], &[task("a", 30, TaskPriority::High)], thursday)
            .unwrap();
        assert_eq!(plan.week_start, sunday());
        assert_eq!(plan.scheduled[0].date, sunday());
    }

    #[test]
    fn invalid_block_aborts_the_run() {
        let blocks = vec![FixedBlock::new("Bad", BlockType::Fixed, 2, t("10:00"), t("09:00"))];
        let result = allocator().plan_week(&blocks, &[task("a", 30, TaskPriority::High)], sunday());
        assert!(matches!(result, Err(ScheduleError::InvalidBlock { .. })));
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        let blocks = vec![FixedBlock::new("Work", BlockType::Work, 0, t("06:00"), t("12:00"))];
        let tasks = vec![
            task("a", 120, TaskPriority::High),
            task("b", 45, TaskPriority::Medium),
            task("c", 300, TaskPriority::Low),
        ];
        let first = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();
        let second = allocator().plan_week(&blocks, &tasks, sunday()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn custom_grid_uses_its_slot_length() {
        let grid = GridConfig {
            day_start_hour: 8,
            day_end_hour: 20,
            slot_minutes: 60,
        };
        let mut allocator = WeekAllocator::with_grid(grid).unwrap().with_id_source(SequentialIds(0));
        let plan = allocator
            .plan_week(&[], &[task("a", 90, TaskPriority::High)], sunday())
            .unwrap();
        assert_eq!(plan.scheduled[0].start_time.to_string(), "08:00");
        assert_eq!(plan.scheduled[0].end_time.to_string(), "10:00");
    }

    #[test]
    fn free_functions_use_default_grid() {
        let tasks = vec![task("a", 30, TaskPriority::High)];
        let scheduled = schedule_tasks_in_week(&[], &tasks, sunday()).unwrap();
        assert_eq!(scheduled.len(), 1);
        assert!(uuid::Uuid::parse_str(&scheduled[0].id).is_ok());
    }

    #[test]
    fn scheduled_task_serializes_with_hh_mm_strings() {
        let plan = allocator()
            .plan_week(&[], &[task("a", 60, TaskPriority::High)], sunday())
            .unwrap();
        let value = serde_json::to_value(&plan.scheduled[0]).unwrap();
        assert_eq!(value["startTime"], "06:00");
        assert_eq!(value["endTime"], "07:00");
        assert_eq!(value["date"], "2026-01-18");
        assert_eq!(value["dayOfWeek"], 0);
        assert_eq!(value["taskId"], "a");
    }
}
