//! Marks fixed blocks on a week grid.

use chrono::NaiveDate;
use tracing::debug;

use crate::block::FixedBlock;
use crate::error::ScheduleError;
use crate::grid::WeekGrid;
use crate::time::{date_for_day, week_start};

/// Remove every slot covered by `blocks` from `grid` for the week containing `week_anchor`.
///
/// All blocks are validated before the grid is touched, so a malformed block
/// leaves the grid unchanged. Occurrences outside a block's validity window
/// are skipped.
///
/// Returns the number of slots removed.
pub fn mark_fixed_blocks(
    grid: &mut WeekGrid,
    blocks: &[FixedBlock],
    week_anchor: NaiveDate,
) -> Result<usize, ScheduleError> {
    let config = *grid.config();
    for block in blocks {
        block.validate(&config)?;
    }

    let start_of_week = week_start(week_anchor);
    let mut removed = 0;

    for block in blocks {
        let date = date_for_day(start_of_week, block.day_of_week);
        if !block.applies_on(date) {
            debug!(
                block = %block.title,
                %date,
                "Skipping fixed block outside its validity window"
            );
            continue;
        }
        removed += grid.occupy(block.day_of_week, block.start_time, block.end_time)?;
    }

    Ok(removed)
}
