//! # weekplan Core Library
//!
//! Deterministic weekly planner: places pending tasks into the free time left
//! around recurring commitments. Every operation is also exposed through the
//! `weekplan` CLI binary.
//!
//! ## Architecture
//!
//! - **Grid**: 30-minute slots from 06:00 to 23:00 for each of the 7 days
//! - **Occupancy**: fixed blocks remove their slots, honoring validity windows
//! - **Priority**: eligible tasks sorted by priority, deadline, then duration
//! - **Allocator**: greedy first-fit over consecutive free slots, Sunday first
//! - **Availability**: free/occupied statistics for a routine
//! - **Storage**: TOML configuration and JSON routine/task files
//!
//! ## Key Components
//!
//! - [`WeekAllocator`]: runs one planning pass and reports unplaced tasks
//! - [`WeekGrid`]: per-run pool of free slots
//! - [`FixedBlock`] / [`Task`]: inputs
//! - [`Config`]: Application configuration management

pub mod allocator;
pub mod availability;
pub mod block;
pub mod error;
pub mod grid;
pub mod id;
pub mod occupancy;
pub mod priority;
pub mod search;
pub mod storage;
pub mod task;
pub mod time;

pub use allocator::{plan_week, schedule_tasks_in_week, ScheduledTask, UnplacedTask, WeekAllocator, WeekPlan};
pub use availability::{week_availability, week_availability_with_grid, DayAvailability, WeekAvailability};
pub use block::{occupied_slots, BlockType, FixedBlock};
pub use error::{ConfigError, CoreError, ScheduleError};
pub use grid::{GridConfig, WeekGrid, DAY_END_HOUR, DAY_START_HOUR, SLOT_DURATION_MINUTES};
pub use id::{generate_schedule_id, IdSource, RandomIds};
pub use occupancy::mark_fixed_blocks;
pub use priority::{compare_tasks, prioritize_tasks};
pub use search::{find_consecutive_run, find_consecutive_slots};
pub use storage::{Config, FilesConfig};
pub use task::{Task, TaskCategory, TaskPriority, TaskStatus};
pub use time::{date_for_day, end_time, slots_needed, week_start, ClockTime, DAYS_IN_WEEK};
